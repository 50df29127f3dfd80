use time::OffsetDateTime;

/// A stored vibe row. The embedding column stays in Postgres; queries that
/// need distances compute them server-side with the pgvector `<=>` operator.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VibeRecord {
	pub uid: String,
	pub narrative: String,
	pub normalized_narrative: String,
	pub model_tag: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// A vibe row annotated with its cosine distance to a query embedding.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VibeNeighbor {
	pub uid: String,
	pub narrative: String,
	pub normalized_narrative: String,
	pub model_tag: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
	pub distance: f64,
}

/// Render an embedding as the bracketed text literal pgvector accepts.
pub fn vector_literal(vec: &[f64]) -> String {
	let mut out = String::with_capacity(vec.len() * 8);

	out.push('[');

	for (i, value) in vec.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}

		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}
