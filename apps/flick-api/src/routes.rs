use axum::{
	Json, Router,
	extract::State,
	http::{StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, post},
};

use flick_service::{ChatMessage, Error as ServiceError};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/chat", post(chat))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn chat(
	State(state): State<AppState>,
	Json(messages): Json<Vec<ChatMessage>>,
) -> Result<Response, ApiError> {
	tracing::debug!(messages = messages.len(), "Chat request received.");

	let text = state.chat.reply(&messages).await?;

	Ok(plain_text(StatusCode::OK, text))
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let status = match err {
			ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};

		tracing::error!(error = %err, "Error in chat route.");

		Self { status, message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = format!("Error: {}. Please try again later.", self.message.trim_end_matches('.'));

		plain_text(self.status, body)
	}
}

fn plain_text(status: StatusCode, body: String) -> Response {
	(status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
