use std::sync::Arc;

use flick_domain::relevance::RelevancePolicy;

use crate::{CompletionProvider, Error, Result, Retriever, prompt, prompt::ChatMessage};

pub struct ChatService {
	retriever: Retriever,
	completion: Arc<dyn CompletionProvider>,
	policy: RelevancePolicy,
}
impl ChatService {
	pub fn new(
		retriever: Retriever,
		completion: Arc<dyn CompletionProvider>,
		policy: RelevancePolicy,
	) -> Self {
		Self { retriever, completion, policy }
	}

	/// Answers the latest user message, grounded on retrieved movies when any are relevant.
	pub async fn reply(&self, messages: &[ChatMessage]) -> Result<String> {
		let Some(question) = messages.iter().rev().find(|message| message.role == "user") else {
			return Err(Error::InvalidRequest {
				message: "messages must include a user message.".to_string(),
			});
		};
		let candidates = self.retriever.retrieve(&question.content, None).await;
		let prompt = prompt::assemble_prompt(messages, &candidates, &self.policy);

		tracing::debug!(candidates = candidates.len(), prompt_chars = prompt.len(), "Sending prompt.");

		let text = self.completion.complete(&prompt).await?;

		tracing::debug!(reply_chars = text.len(), "Received completion.");

		Ok(text)
	}
}
