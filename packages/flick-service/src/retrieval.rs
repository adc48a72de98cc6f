use std::sync::Arc;

use flick_domain::{query, relevance::Candidate};

use crate::SimilarityMatcher;

/// Turns a chat message into ranked context candidates. Never fails: a broken match degrades to no
/// context.
pub struct Retriever {
	matcher: Arc<dyn SimilarityMatcher>,
	default_limit: u32,
}
impl Retriever {
	pub fn new(matcher: Arc<dyn SimilarityMatcher>, default_limit: u32) -> Self {
		Self { matcher, default_limit }
	}

	/// Candidates in the order the matcher ranked them, at most `limit` (or the default limit).
	pub async fn retrieve(&self, raw_query: &str, limit: Option<u32>) -> Vec<Candidate> {
		let limit = limit.unwrap_or(self.default_limit);
		let term = query::clean(raw_query);

		if term.is_empty() || limit == 0 {
			tracing::debug!(limit, "Nothing to search for.");

			return Vec::new();
		}

		match self.matcher.match_records(&term, limit).await {
			Ok(mut candidates) => {
				candidates.truncate(limit as usize);

				tracing::info!(term = %term, count = candidates.len(), "Retrieved candidates.");

				candidates
			},
			Err(err) => {
				tracing::error!(term = %term, error = %err, "Error matching records.");

				Vec::new()
			},
		}
	}
}
