use std::sync::Arc;

use flick_domain::relevance::RelevancePolicy;
use flick_providers::{completion::CompletionClient, embedding::EmbeddingClient};
use flick_service::{ChatService, PgSimilarityMatcher, Retriever};
use flick_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub chat: Arc<ChatService>,
}
impl AppState {
	pub async fn new(config: &flick_config::Config) -> color_eyre::Result<Self> {
		let db = Arc::new(Db::connect(&config.storage.postgres).await?);

		db.ensure_schema(config.storage.postgres.vector_dim).await?;

		let embedding = Arc::new(EmbeddingClient::new(config.providers.embedding.clone())?);
		let completion = Arc::new(CompletionClient::new(config.providers.llm.clone())?);
		let matcher =
			Arc::new(PgSimilarityMatcher::new(db, embedding, config.storage.postgres.vector_dim));
		let retriever = Retriever::new(matcher, config.retrieval.top_k);
		let policy = RelevancePolicy::new(config.retrieval.relevance_threshold);

		Ok(Self::from_service(ChatService::new(retriever, completion, policy)))
	}

	pub fn from_service(chat: ChatService) -> Self {
		Self { chat: Arc::new(chat) }
	}
}
