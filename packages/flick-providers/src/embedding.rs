use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Client for an embedding endpoint. Built once and reused for every call.
pub struct EmbeddingClient {
	cfg: flick_config::EmbeddingProviderConfig,
	client: Client,
	url: String,
}
impl EmbeddingClient {
	pub fn new(cfg: flick_config::EmbeddingProviderConfig) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.build()?;
		let url = format!("{}{}", cfg.api_base, cfg.path);

		Ok(Self { cfg, client, url })
	}

	/// Embeds one text and returns the raw embedding payload, shape untouched.
	pub async fn embed(&self, text: &str) -> Result<Value> {
		let body = serde_json::json!({
			"model": self.cfg.model,
			"input": text,
			"dimensions": self.cfg.dimensions,
		});
		let res = self.client.post(&self.url).json(&body).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		extract_raw_embedding(json)
	}
}

// Accepts OpenAI-style `data[0].embedding`, Gemini-style `embedding.values`, or a bare `embedding`.
fn extract_raw_embedding(mut json: Value) -> Result<Value> {
	if let Some(embedding) = json
		.get_mut("data")
		.and_then(|data| data.get_mut(0))
		.and_then(|item| item.get_mut("embedding"))
	{
		return Ok(embedding.take());
	}

	let Some(embedding) = json.get_mut("embedding") else {
		return Err(Error::InvalidResponse {
			message: "Embedding response is missing an embedding payload.".to_string(),
		});
	};

	if let Some(values) = embedding.get_mut("values") {
		return Ok(values.take());
	}

	Ok(embedding.take())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_openai_style_payload() {
		let json = serde_json::json!({
			"data": [{ "index": 0, "embedding": [0.5, 1.5] }]
		});
		let raw = extract_raw_embedding(json).expect("extract failed");

		assert_eq!(raw, serde_json::json!([0.5, 1.5]));
	}

	#[test]
	fn extracts_gemini_style_values() {
		let json = serde_json::json!({ "embedding": { "values": [0.25, 0.75] } });
		let raw = extract_raw_embedding(json).expect("extract failed");

		assert_eq!(raw, serde_json::json!([0.25, 0.75]));
	}

	#[test]
	fn passes_other_shapes_through_untouched() {
		let json = serde_json::json!({ "embedding": "[0.1,0.2]" });
		let raw = extract_raw_embedding(json).expect("extract failed");

		assert_eq!(raw, serde_json::json!("[0.1,0.2]"));

		let json = serde_json::json!({ "embedding": { "0": 0.1, "1": 0.2 } });
		let raw = extract_raw_embedding(json).expect("extract failed");

		assert_eq!(raw, serde_json::json!({ "0": 0.1, "1": 0.2 }));
	}

	#[test]
	fn rejects_response_without_embedding() {
		let json = serde_json::json!({ "error": "quota" });

		assert!(matches!(extract_raw_embedding(json), Err(Error::InvalidResponse { .. })));
	}
}
