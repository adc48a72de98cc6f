use serde::{Deserialize, Serialize};

use flick_domain::relevance::{Candidate, RelevancePolicy};

const CONTEXT_HEADER: &str =
	"system: Use these movie details when they help answer the conversation below.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: String,
	pub content: String,
}
impl ChatMessage {
	pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
		Self { role: role.into(), content: content.into() }
	}
}

/// Builds the completion prompt: a context block of sufficiently relevant candidates, then the
/// transcript as `role: content` lines, ending with an open `assistant:` turn.
pub fn assemble_prompt(
	messages: &[ChatMessage],
	candidates: &[Candidate],
	policy: &RelevancePolicy,
) -> String {
	let mut lines = Vec::with_capacity(messages.len() + candidates.len() + 1);
	let full = policy.full_detail(candidates);

	if !full.is_empty() {
		lines.push(CONTEXT_HEADER.to_string());

		for candidate in full {
			lines.push(format!(
				"- [#{}] {} (relevance {:.2})",
				candidate.id, candidate.overview, candidate.relevance
			));
		}
	}

	for message in messages {
		lines.push(format!("{}: {}", message.role, message.content));
	}

	format!("{}\nassistant:", lines.join("\n"))
}
