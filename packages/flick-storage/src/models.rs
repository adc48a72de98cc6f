#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Movie {
	pub id: i64,
	pub overview: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct StoredEmbedding {
	pub id: i64,
	/// pgvector text form, `[v1,v2,...]`. `None` while the record is unembedded.
	pub embedding: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MovieMatch {
	pub id: i64,
	pub overview: String,
	pub similarity: f64,
}
