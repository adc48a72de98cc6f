use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Client for a chat-completions endpoint. The assembled prompt is sent as one user message.
pub struct CompletionClient {
	cfg: flick_config::LlmProviderConfig,
	client: Client,
	url: String,
}
impl CompletionClient {
	pub fn new(cfg: flick_config::LlmProviderConfig) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.build()?;
		let url = format!("{}{}", cfg.api_base, cfg.path);

		Ok(Self { cfg, client, url })
	}

	pub async fn complete(&self, prompt: &str) -> Result<String> {
		let body = serde_json::json!({
			"model": self.cfg.model,
			"temperature": self.cfg.temperature,
			"messages": [{ "role": "user", "content": prompt }],
		});
		let res = self.client.post(&self.url).json(&body).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_completion_text(&json)
	}
}

fn parse_completion_text(json: &Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(str::to_string)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing message content.".to_string(),
		})
}
