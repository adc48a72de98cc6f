//! Embedding backfill.
//!
//! One pass walks the records whose embedding is unset, a window at a time, and embeds them one by
//! one. A failure on one record is logged and counted; only a failed window fetch stops the pass.
//! Records that fail stay unembedded, so a later pass picks them up again.

use std::{sync::Arc, time::Duration};

use serde::Serialize;
use serde_json::Value;

use flick_domain::vector;
use flick_storage::models::Movie;

use crate::{EmbeddingProvider, Error, RecordStore, Result};

#[derive(Clone, Debug)]
pub struct BackfillOptions {
	pub batch_size: u32,
	pub batch_delay: Duration,
	/// Stop after this many records have been attempted in this run.
	pub max_records: Option<u64>,
	pub vector_dim: u32,
}
impl BackfillOptions {
	pub fn from_config(cfg: &flick_config::Config) -> Self {
		Self {
			batch_size: cfg.backfill.batch_size,
			batch_delay: Duration::from_millis(cfg.backfill.batch_delay_ms),
			max_records: None,
			vector_dim: cfg.storage.postgres.vector_dim,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
	pub batches: u64,
	pub fetched: u64,
	pub embedded: u64,
	pub verified: u64,
	pub unverified: u64,
	pub skipped: u64,
	pub failed: u64,
}
impl BackfillReport {
	pub fn processed(&self) -> u64 {
		self.embedded + self.skipped + self.failed
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
	Verified { dims: usize },
	Missing,
	Failed { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
	Embedded(Verification),
	/// The write changed nothing: the record was embedded elsewhere or removed.
	Skipped,
}

pub struct BackfillDriver {
	store: Arc<dyn RecordStore>,
	embedding: Arc<dyn EmbeddingProvider>,
	options: BackfillOptions,
}
impl BackfillDriver {
	pub fn new(
		store: Arc<dyn RecordStore>,
		embedding: Arc<dyn EmbeddingProvider>,
		options: BackfillOptions,
	) -> Self {
		Self { store, embedding, options }
	}

	/// Runs one pass until no unembedded records remain or `max_records` is reached.
	pub async fn run(&self) -> Result<BackfillReport> {
		let mut report = BackfillReport::default();
		// Only records still unembedded after processing stay in the filtered window, so only they
		// advance the offset.
		let mut offset = 0_u64;

		loop {
			let Some(limit) = self.next_window_size(&report) else {
				tracing::info!(processed = report.processed(), "Record limit reached.");

				break;
			};
			let batch = match self.store.fetch_unembedded(offset, limit).await {
				Ok(batch) => batch,
				Err(err) => {
					tracing::error!(error = %err, offset, ?report, "Error fetching records. Stopping pass.");

					return Err(Error::BatchFetch { message: err.to_string() });
				},
			};

			if batch.is_empty() {
				tracing::info!("No more records to process.");

				break;
			}

			tracing::info!(batch_len = batch.len(), offset, "Processing batch.");

			report.batches += 1;
			report.fetched += batch.len() as u64;

			for record in &batch {
				match self.backfill_record(record).await {
					Ok(RecordOutcome::Embedded(verification)) => {
						report.embedded += 1;

						if matches!(verification, Verification::Verified { .. }) {
							report.verified += 1;
						} else {
							report.unverified += 1;
						}
					},
					Ok(RecordOutcome::Skipped) => report.skipped += 1,
					Err(err) => {
						tracing::error!(record_id = record.id, error = %err, "Error processing record.");

						report.failed += 1;
						offset += 1;
					},
				}
			}

			tracing::info!(processed = report.processed(), "Processed records so far.");

			if !self.options.batch_delay.is_zero() {
				tokio::time::sleep(self.options.batch_delay).await;
			}
		}

		tracing::info!(
			batches = report.batches,
			embedded = report.embedded,
			verified = report.verified,
			unverified = report.unverified,
			skipped = report.skipped,
			failed = report.failed,
			"Finished processing records."
		);

		Ok(report)
	}

	/// Embeds, stores and verifies a single record.
	pub async fn backfill_record(&self, record: &Movie) -> Result<RecordOutcome> {
		let raw = self.embedding.embed(&record.overview).await?;
		let vec = vector::normalize(&raw);

		if vec.is_empty() {
			return Err(Error::EmptyVector { id: record.id });
		}
		if vec.len() != self.options.vector_dim as usize {
			return Err(Error::DimensionMismatch {
				id: record.id,
				expected: self.options.vector_dim as usize,
				actual: vec.len(),
			});
		}

		tracing::debug!(record_id = record.id, sample = %vector::sample(&vec), "Generated embedding.");

		let literal = vector::format_vector_text(&vec);
		let rows = self.store.write_embedding(record.id, &literal).await?;

		if rows == 0 {
			tracing::info!(
				record_id = record.id,
				"No rows changed. The record was already embedded or no longer exists."
			);

			return Ok(RecordOutcome::Skipped);
		}

		tracing::info!(record_id = record.id, rows, "Updated embedding.");

		Ok(RecordOutcome::Embedded(self.verify(record.id).await))
	}

	async fn verify(&self, id: i64) -> Verification {
		match self.store.read_embedding(id).await {
			Ok(Some(stored)) => {
				let vec = vector::normalize(&Value::String(stored));

				if vec.is_empty() {
					tracing::warn!(record_id = id, "Failed to verify embedding. Stored value is empty.");

					return Verification::Missing;
				}

				tracing::debug!(record_id = id, sample = %vector::sample(&vec), "Verified embedding.");

				Verification::Verified { dims: vec.len() }
			},
			Ok(None) => {
				tracing::warn!(record_id = id, "Failed to verify embedding. No stored value.");

				Verification::Missing
			},
			Err(err) => {
				tracing::error!(record_id = id, error = %err, "Error verifying update.");

				Verification::Failed { message: err.to_string() }
			},
		}
	}

	fn next_window_size(&self, report: &BackfillReport) -> Option<u32> {
		let Some(max) = self.options.max_records else {
			return Some(self.options.batch_size);
		};
		let remaining = max.saturating_sub(report.processed());

		if remaining == 0 {
			return None;
		}

		Some(u32::try_from(remaining).map_or(self.options.batch_size, |r| r.min(self.options.batch_size)))
	}
}
