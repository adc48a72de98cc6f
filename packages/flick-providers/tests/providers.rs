use axum::{Json, Router, http::HeaderMap, routing::post};
use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};
use tokio::net::TcpListener;

use flick_config::{EmbeddingProviderConfig, LlmProviderConfig};
use flick_providers::{completion::CompletionClient, embedding::EmbeddingClient};

async fn serve(router: Router) -> String {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind listener.");
	let addr = listener.local_addr().expect("Failed to read local address.");

	tokio::spawn(async move {
		axum::serve(listener, router).await.expect("Test server failed.");
	});

	format!("http://{addr}")
}

fn embedding_config(api_base: String) -> EmbeddingProviderConfig {
	EmbeddingProviderConfig {
		provider_id: "test".to_string(),
		api_base,
		api_key: "secret".to_string(),
		path: "/embeddings".to_string(),
		model: "test-embedding".to_string(),
		dimensions: 3,
		timeout_ms: 5_000,
		default_headers: Map::new(),
	}
}

fn llm_config(api_base: String) -> LlmProviderConfig {
	LlmProviderConfig {
		provider_id: "test".to_string(),
		api_base,
		api_key: "secret".to_string(),
		path: "/chat/completions".to_string(),
		model: "test-llm".to_string(),
		temperature: 0.0,
		timeout_ms: 5_000,
		default_headers: Map::new(),
	}
}

#[test]
fn builds_bearer_auth_header() {
	let headers =
		flick_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut extra = Map::new();

	extra.insert("x-retries".to_string(), Value::from(3));

	assert!(flick_providers::auth_headers("secret", &extra).is_err());
}

#[tokio::test]
async fn embedding_client_returns_raw_payload() {
	let router = Router::new().route(
		"/embeddings",
		post(|headers: HeaderMap, Json(body): Json<Value>| async move {
			assert_eq!(headers.get("authorization").and_then(|v| v.to_str().ok()), Some("Bearer secret"));
			assert_eq!(body["input"], "A thief who steals corporate secrets.");
			assert_eq!(body["dimensions"], 3);

			Json(serde_json::json!({ "embedding": { "values": [0.1, 0.2, 0.3] } }))
		}),
	);
	let base = serve(router).await;
	let client = EmbeddingClient::new(embedding_config(base)).expect("Failed to build client.");
	let raw = client.embed("A thief who steals corporate secrets.").await.expect("Embed failed.");

	assert_eq!(raw, serde_json::json!([0.1, 0.2, 0.3]));
}

#[tokio::test]
async fn embedding_client_surfaces_http_errors() {
	let router = Router::new().route(
		"/embeddings",
		post(|| async { (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down") }),
	);
	let base = serve(router).await;
	let client = EmbeddingClient::new(embedding_config(base)).expect("Failed to build client.");

	assert!(matches!(client.embed("text").await, Err(flick_providers::Error::Reqwest(_))));
}

#[tokio::test]
async fn completion_client_sends_prompt_as_user_message() {
	let router = Router::new().route(
		"/chat/completions",
		post(|Json(body): Json<Value>| async move {
			assert_eq!(body["messages"][0]["role"], "user");
			assert_eq!(body["messages"][0]["content"], "user: hi\nassistant:");

			Json(serde_json::json!({
				"choices": [{ "message": { "role": "assistant", "content": "Hello!" } }]
			}))
		}),
	);
	let base = serve(router).await;
	let client = CompletionClient::new(llm_config(base)).expect("Failed to build client.");
	let text = client.complete("user: hi\nassistant:").await.expect("Completion failed.");

	assert_eq!(text, "Hello!");
}
