use time::OffsetDateTime;

use crate::{
	Result,
	db::Db,
	models::{VibeNeighbor, VibeRecord},
};

pub struct UpsertVibe<'a> {
	pub uid: &'a str,
	pub narrative: &'a str,
	pub normalized_narrative: &'a str,
	pub embedding_literal: &'a str,
	pub model_tag: &'a str,
	pub now: OffsetDateTime,
}

/// Last-write-wins upsert keyed by uid. Everything except `created_at` is
/// overwritten on conflict, so repeated provisioning converges.
pub async fn upsert_vibe(db: &Db, args: UpsertVibe<'_>) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO vibes (
	uid,
	narrative,
	normalized_narrative,
	embedding,
	model_tag,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4::text::vector, $5, $6, $6)
ON CONFLICT (uid) DO UPDATE
SET narrative = EXCLUDED.narrative,
	normalized_narrative = EXCLUDED.normalized_narrative,
	embedding = EXCLUDED.embedding,
	model_tag = EXCLUDED.model_tag,
	updated_at = EXCLUDED.updated_at",
	)
	.bind(args.uid)
	.bind(args.narrative)
	.bind(args.normalized_narrative)
	.bind(args.embedding_literal)
	.bind(args.model_tag)
	.bind(args.now)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn fetch_vibe(db: &Db, uid: &str) -> Result<Option<VibeRecord>> {
	let record = sqlx::query_as::<_, VibeRecord>(
		"\
SELECT uid, narrative, normalized_narrative, model_tag, created_at, updated_at
FROM vibes
WHERE uid = $1",
	)
	.bind(uid)
	.fetch_optional(&db.pool)
	.await?;

	Ok(record)
}

pub async fn list_vibes(db: &Db, limit: i64) -> Result<Vec<VibeRecord>> {
	let records = sqlx::query_as::<_, VibeRecord>(
		"\
SELECT uid, narrative, normalized_narrative, model_tag, created_at, updated_at
FROM vibes
ORDER BY updated_at DESC
LIMIT $1",
	)
	.bind(limit)
	.fetch_all(&db.pool)
	.await?;

	Ok(records)
}

/// K-nearest rows by cosine distance. Distance ties break by uid so the
/// candidate set is deterministic.
pub async fn nearest_vibes(
	db: &Db,
	embedding_literal: &str,
	k: i64,
) -> Result<Vec<VibeNeighbor>> {
	let neighbors = sqlx::query_as::<_, VibeNeighbor>(
		"\
SELECT
	uid,
	narrative,
	normalized_narrative,
	model_tag,
	created_at,
	updated_at,
	(embedding <=> $1::text::vector)::float8 AS distance
FROM vibes
ORDER BY embedding <=> $1::text::vector, uid
LIMIT $2",
	)
	.bind(embedding_literal)
	.bind(k)
	.fetch_all(&db.pool)
	.await?;

	Ok(neighbors)
}

pub async fn wipe_vibes(db: &Db) -> Result<u64> {
	let result = sqlx::query("DELETE FROM vibes").execute(&db.pool).await?;

	Ok(result.rows_affected())
}
