pub mod backfill;
pub mod chat;
pub mod prompt;
pub mod retrieval;
pub mod store;

mod error;

pub use backfill::{BackfillDriver, BackfillOptions, BackfillReport, RecordOutcome, Verification};
pub use chat::ChatService;
pub use error::{Error, Result};
pub use prompt::ChatMessage;
pub use retrieval::Retriever;
pub use store::PgSimilarityMatcher;

use std::{future::Future, pin::Pin};

use serde_json::Value;

use flick_domain::relevance::Candidate;
use flick_providers::{completion::CompletionClient, embedding::EmbeddingClient};
use flick_storage::models::Movie;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	/// Returns the raw embedding payload. Its shape is resolved by the vector normalizer.
	fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Value>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// The persistence operations the backfill pass needs.
pub trait RecordStore
where
	Self: Send + Sync,
{
	/// Records whose embedding is unset, in a stable order, skipping `offset` of them.
	fn fetch_unembedded<'a>(&'a self, offset: u64, limit: u32) -> BoxFuture<'a, Result<Vec<Movie>>>;

	/// Stores a vector literal on an unembedded record and returns the rows changed.
	fn write_embedding<'a>(&'a self, id: i64, literal: &'a str) -> BoxFuture<'a, Result<u64>>;

	/// The stored vector literal, `None` when the record is missing or unembedded.
	fn read_embedding<'a>(&'a self, id: i64) -> BoxFuture<'a, Result<Option<String>>>;
}

pub trait SimilarityMatcher
where
	Self: Send + Sync,
{
	/// Ranked candidates for a search term, most relevant first, at most `limit` of them.
	fn match_records<'a>(&'a self, term: &'a str, limit: u32)
	-> BoxFuture<'a, Result<Vec<Candidate>>>;
}

impl EmbeddingProvider for EmbeddingClient {
	fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Value>> {
		Box::pin(async move { Ok(EmbeddingClient::embed(self, text).await?) })
	}
}

impl CompletionProvider for CompletionClient {
	fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(CompletionClient::complete(self, prompt).await?) })
	}
}
