use std::sync::Arc;

use flick_domain::{relevance::Candidate, vector};
use flick_storage::{Error as StorageError, db::Db, models::Movie, queries};

use crate::{BoxFuture, EmbeddingProvider, Error, RecordStore, Result, SimilarityMatcher};

impl RecordStore for Db {
	fn fetch_unembedded<'a>(&'a self, offset: u64, limit: u32) -> BoxFuture<'a, Result<Vec<Movie>>> {
		Box::pin(async move { Ok(queries::fetch_unembedded_batch(self, offset, limit).await?) })
	}

	fn write_embedding<'a>(&'a self, id: i64, literal: &'a str) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move { Ok(queries::update_embedding(self, id, literal).await?) })
	}

	fn read_embedding<'a>(&'a self, id: i64) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async move {
			match queries::fetch_embedding(self, id).await {
				Ok(stored) => Ok(stored.embedding),
				Err(StorageError::NotFound(_)) => Ok(None),
				Err(err) => Err(err.into()),
			}
		})
	}
}

/// Similarity match backed by the `match_movies` procedure.
///
/// The term is embedded with the same provider the backfill uses, so query and record vectors
/// share one space.
pub struct PgSimilarityMatcher {
	db: Arc<Db>,
	embedding: Arc<dyn EmbeddingProvider>,
	vector_dim: u32,
}
impl PgSimilarityMatcher {
	pub fn new(db: Arc<Db>, embedding: Arc<dyn EmbeddingProvider>, vector_dim: u32) -> Self {
		Self { db, embedding, vector_dim }
	}

	async fn query_literal(&self, term: &str) -> Result<String> {
		let raw = self.embedding.embed(term).await?;
		let vec = vector::normalize(&raw);

		if vec.len() != self.vector_dim as usize {
			return Err(Error::Provider {
				message: format!(
					"Query embedding has {} dimensions, expected {}.",
					vec.len(),
					self.vector_dim
				),
			});
		}

		Ok(vector::format_vector_text(&vec))
	}
}
impl SimilarityMatcher for PgSimilarityMatcher {
	fn match_records<'a>(
		&'a self,
		term: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Candidate>>> {
		Box::pin(async move {
			let literal = self.query_literal(term).await?;
			let rows = queries::match_movies(&self.db, &literal, limit).await?;

			Ok(rows
				.into_iter()
				.map(|row| Candidate {
					id: row.id,
					overview: row.overview,
					relevance: row.similarity as f32,
				})
				.collect())
		})
	}
}
