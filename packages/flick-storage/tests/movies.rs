use flick_config::Postgres;
use flick_storage::{db::Db, queries};
use flick_testkit::TestDatabase;

async fn bootstrap(test_db: &TestDatabase) -> Db {
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1, vector_dim: 3 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema(3).await.expect("Failed to ensure schema.");

	db
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set FLICK_PG_DSN to run."]
async fn schema_bootstrap_is_idempotent() {
	let Some(base_dsn) = flick_testkit::env_dsn() else {
		eprintln!("Skipping schema_bootstrap_is_idempotent; set FLICK_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;

	db.ensure_schema(3).await.expect("Second bootstrap must succeed.");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set FLICK_PG_DSN to run."]
async fn embedding_write_is_guarded_and_verifiable() {
	let Some(base_dsn) = flick_testkit::env_dsn() else {
		eprintln!(
			"Skipping embedding_write_is_guarded_and_verifiable; set FLICK_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;

	queries::insert_movie(&db, 1, "Inception", "A thief enters dreams.")
		.await
		.expect("Failed to insert movie.");
	queries::insert_movie(&db, 2, "Heat", "A heist crew is hunted.")
		.await
		.expect("Failed to insert movie.");

	let batch = queries::fetch_unembedded_batch(&db, 0, 5).await.expect("Failed to fetch batch.");

	assert_eq!(batch.iter().map(|movie| movie.id).collect::<Vec<_>>(), vec![1, 2]);

	let rows = queries::update_embedding(&db, 1, "[0.1,0.2,0.3]").await.expect("Update failed.");

	assert_eq!(rows, 1);

	let rows = queries::update_embedding(&db, 1, "[0.4,0.5,0.6]").await.expect("Update failed.");

	assert_eq!(rows, 0, "an embedded record must not be overwritten");

	let stored = queries::fetch_embedding(&db, 1).await.expect("Verification read failed.");

	assert_eq!(stored.embedding.as_deref(), Some("[0.1,0.2,0.3]"));
	assert_eq!(queries::count_unembedded(&db).await.expect("Count failed."), 1);

	let batch = queries::fetch_unembedded_batch(&db, 0, 5).await.expect("Failed to fetch batch.");

	assert_eq!(batch.iter().map(|movie| movie.id).collect::<Vec<_>>(), vec![2]);
	assert!(matches!(
		queries::fetch_embedding(&db, 99).await,
		Err(flick_storage::Error::NotFound(_))
	));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set FLICK_PG_DSN to run."]
async fn match_movies_ranks_by_cosine_similarity() {
	let Some(base_dsn) = flick_testkit::env_dsn() else {
		eprintln!(
			"Skipping match_movies_ranks_by_cosine_similarity; set FLICK_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;

	for (id, literal) in [(1, "[1,0,0]"), (2, "[0,1,0]"), (3, "[0.9,0.1,0]")] {
		queries::insert_movie(&db, id, "", "overview").await.expect("Failed to insert movie.");
		queries::update_embedding(&db, id, literal).await.expect("Update failed.");
	}

	let matches = queries::match_movies(&db, "[1,0,0]", 2).await.expect("Match failed.");

	assert_eq!(matches.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 3]);
	assert!((matches[0].similarity - 1.0).abs() < 1e-6);
	assert!(matches[0].similarity >= matches[1].similarity);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
