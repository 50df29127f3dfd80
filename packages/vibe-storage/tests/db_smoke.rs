use time::OffsetDateTime;

use vibe_config::Postgres;
use vibe_storage::{
	db::Db,
	models::vector_literal,
	queries::{self, UpsertVibe},
};
use vibe_testkit::TestDatabase;

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set VIBE_PG_DSN to run."]
async fn db_connects_and_bootstraps() {
	let Some(base_dsn) = vibe_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps; set VIBE_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema(8).await.expect("Failed to ensure schema.");

	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name = 'vibes'",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query schema tables.");

	assert_eq!(count, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set VIBE_PG_DSN to run."]
async fn upsert_preserves_created_at_and_refreshes_updated_at() {
	let Some(base_dsn) = vibe_testkit::env_dsn() else {
		eprintln!(
			"Skipping upsert_preserves_created_at_and_refreshes_updated_at; set VIBE_PG_DSN to run."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema(4).await.expect("Failed to ensure schema.");

	let embedding = vector_literal(&[1.0, 0.0, 0.0, 0.0]);
	let first_now = OffsetDateTime::now_utc();

	queries::upsert_vibe(
		&db,
		UpsertVibe {
			uid: "abc",
			narrative: "Ana just joined 42Connect",
			normalized_narrative: "ana just joined 42connect",
			embedding_literal: &embedding,
			model_tag: "fallback-sha512-1536",
			now: first_now,
		},
	)
	.await
	.expect("First upsert failed.");

	let created = queries::fetch_vibe(&db, "abc")
		.await
		.expect("Fetch failed.")
		.expect("Record expected after upsert.");
	let second_now = first_now + time::Duration::seconds(5);

	queries::upsert_vibe(
		&db,
		UpsertVibe {
			uid: "abc",
			narrative: "Ana just joined 42Connect. based in Paris",
			normalized_narrative: "ana just joined 42connect based in paris",
			embedding_literal: &embedding,
			model_tag: "fallback-sha512-1536",
			now: second_now,
		},
	)
	.await
	.expect("Second upsert failed.");

	let updated = queries::fetch_vibe(&db, "abc")
		.await
		.expect("Fetch failed.")
		.expect("Record expected after second upsert.");

	assert_eq!(updated.created_at, created.created_at);
	assert!(updated.updated_at > created.updated_at);
	assert!(updated.narrative.ends_with("based in Paris"));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres with pgvector. Set VIBE_PG_DSN to run."]
async fn nearest_vibes_orders_by_cosine_distance() {
	let Some(base_dsn) = vibe_testkit::env_dsn() else {
		eprintln!("Skipping nearest_vibes_orders_by_cosine_distance; set VIBE_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema(4).await.expect("Failed to ensure schema.");

	let now = OffsetDateTime::now_utc();
	let rows: [(&str, [f64; 4]); 3] = [
		("aligned", [1.0, 0.0, 0.0, 0.0]),
		("orthogonal", [0.0, 1.0, 0.0, 0.0]),
		("opposed", [-1.0, 0.0, 0.0, 0.0]),
	];

	for (uid, vector) in rows {
		queries::upsert_vibe(
			&db,
			UpsertVibe {
				uid,
				narrative: uid,
				normalized_narrative: uid,
				embedding_literal: &vector_literal(&vector),
				model_tag: "fallback-sha512-1536",
				now,
			},
		)
		.await
		.expect("Upsert failed.");
	}

	let neighbors = queries::nearest_vibes(&db, &vector_literal(&[1.0, 0.0, 0.0, 0.0]), 3)
		.await
		.expect("Nearest lookup failed.");
	let uids = neighbors.iter().map(|n| n.uid.as_str()).collect::<Vec<_>>();

	assert_eq!(uids, ["aligned", "orthogonal", "opposed"]);
	assert!(neighbors[0].distance < 1e-6);
	assert!((neighbors[1].distance - 1.0).abs() < 1e-6);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
