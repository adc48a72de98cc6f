use crate::{
	Error, Result,
	db::Db,
	models::{Movie, MovieMatch, StoredEmbedding},
};

pub async fn insert_movie(db: &Db, id: i64, title: &str, overview: &str) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO movies (id, title, overview)
VALUES ($1, $2, $3)
ON CONFLICT (id) DO UPDATE
SET title = EXCLUDED.title, overview = EXCLUDED.overview",
	)
	.bind(id)
	.bind(title)
	.bind(overview)
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Reads a window of records whose embedding is unset, in primary-key order.
pub async fn fetch_unembedded_batch(db: &Db, offset: u64, limit: u32) -> Result<Vec<Movie>> {
	let offset = i64::try_from(offset)
		.map_err(|_| Error::InvalidArgument(format!("Offset {offset} exceeds supported range.")))?;
	let rows = sqlx::query_as::<_, Movie>(
		"\
SELECT id, overview
FROM movies
WHERE embedding IS NULL
ORDER BY id ASC
OFFSET $1
LIMIT $2",
	)
	.bind(offset)
	.bind(i64::from(limit))
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// Writes a vector literal to an unembedded record. Returns the number of rows changed, which is
/// zero when the record is gone or was embedded by someone else.
pub async fn update_embedding(db: &Db, id: i64, vector_literal: &str) -> Result<u64> {
	let result = sqlx::query(
		"\
UPDATE movies
SET embedding = $1::vector
WHERE id = $2 AND embedding IS NULL",
	)
	.bind(vector_literal)
	.bind(id)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected())
}

pub async fn fetch_embedding(db: &Db, id: i64) -> Result<StoredEmbedding> {
	let row = sqlx::query_as::<_, StoredEmbedding>(
		"SELECT id, embedding::text AS embedding FROM movies WHERE id = $1",
	)
	.bind(id)
	.fetch_optional(&db.pool)
	.await?;

	row.ok_or_else(|| Error::NotFound(format!("movie {id}")))
}

pub async fn count_unembedded(db: &Db) -> Result<i64> {
	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM movies WHERE embedding IS NULL")
		.fetch_one(&db.pool)
		.await?;

	Ok(count)
}

pub async fn match_movies(db: &Db, query_literal: &str, match_count: u32) -> Result<Vec<MovieMatch>> {
	let match_count = i32::try_from(match_count).map_err(|_| {
		Error::InvalidArgument(format!("Match count {match_count} exceeds supported range."))
	})?;
	let rows = sqlx::query_as::<_, MovieMatch>(
		"SELECT id, overview, similarity FROM match_movies($1::vector, $2)",
	)
	.bind(query_literal)
	.bind(match_count)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
