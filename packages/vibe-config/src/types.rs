use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
	pub ranking: Ranking,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

/// Which embedding producer the service runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingMode {
	/// Hash-expansion placeholder vectors, no credentials required.
	Deterministic,
	/// OpenAI-compatible HTTP endpoint described by the remaining fields.
	External,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub mode: EmbeddingMode,
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub top_k: u32,
	pub candidate_k: u32,
	pub list_limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct Ranking {
	/// Weight of cosine similarity in the combined score.
	pub vector_weight: f64,
	/// Weight of the lexical overlap ratio in the combined score.
	pub overlap_weight: f64,
	/// Results scoring below this are dropped; 0.0 disables the floor.
	pub min_score: f64,
}
