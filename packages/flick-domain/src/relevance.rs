use serde::Serialize;

pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.5;

/// A record returned by a similarity match, scored for one query. Never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Candidate {
	pub id: i64,
	pub overview: String,
	pub relevance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detail {
	Full,
	Omitted,
}

/// Decides how much of a candidate reaches the prompt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelevancePolicy {
	pub threshold: f32,
}
impl RelevancePolicy {
	pub fn new(threshold: f32) -> Self {
		Self { threshold }
	}

	/// The threshold is inclusive.
	pub fn classify(&self, relevance: f32) -> Detail {
		if relevance >= self.threshold { Detail::Full } else { Detail::Omitted }
	}

	pub fn full_detail<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
		candidates
			.iter()
			.filter(|candidate| self.classify(candidate.relevance) == Detail::Full)
			.collect()
	}
}
impl Default for RelevancePolicy {
	fn default() -> Self {
		Self::new(DEFAULT_RELEVANCE_THRESHOLD)
	}
}
