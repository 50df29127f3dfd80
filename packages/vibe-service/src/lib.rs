pub mod admin;
pub mod list;
pub mod provision;
pub mod ranking;
pub mod search;
pub mod time_serde;
pub mod upsert;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

pub use admin::WipeReport;
pub use list::{ListRequest, ListResponse, VibeSummary};
pub use provision::{ProvisionOp, ProvisionRequest, ProvisionResponse};
pub use search::{SearchItem, SearchRequest, SearchResponse};
pub use upsert::{UpsertVibeRequest, UpsertVibeResponse};

use vibe_config::{Config, EmbeddingMode, EmbeddingProviderConfig};
use vibe_domain::{ModelTag, deterministic_embedding};
use vibe_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Seam for embedding generation. The deterministic impl is pure and
/// in-process; the remote impl calls the configured HTTP provider. Both are
/// interchangeable behind the stored model tag.
pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, vibe_providers::Result<Vec<Vec<f64>>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

pub struct VibeService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
}

struct DeterministicEmbedding;

struct RemoteEmbedding;

impl EmbeddingProvider for DeterministicEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, vibe_providers::Result<Vec<Vec<f64>>>> {
		let vectors: Vec<Vec<f64>> =
			texts.iter().map(|text| deterministic_embedding(text)).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

impl EmbeddingProvider for RemoteEmbedding {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, vibe_providers::Result<Vec<Vec<f64>>>> {
		Box::pin(vibe_providers::embedding::embed(cfg, texts))
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}

	pub fn for_mode(mode: EmbeddingMode) -> Self {
		match mode {
			EmbeddingMode::Deterministic => Self { embedding: Arc::new(DeterministicEmbedding) },
			EmbeddingMode::External => Self { embedding: Arc::new(RemoteEmbedding) },
		}
	}
}

impl VibeService {
	pub fn new(cfg: Config, db: Db) -> Self {
		let providers = Providers::for_mode(cfg.providers.embedding.mode);

		Self { cfg, db, providers }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers }
	}

	/// The tag recorded on rows this service writes.
	pub fn model_tag(&self) -> ModelTag {
		let embedding = &self.cfg.providers.embedding;

		match embedding.mode {
			EmbeddingMode::Deterministic => ModelTag::DeterministicFallback,
			EmbeddingMode::External => ModelTag::External(format!(
				"{}:{}:{}",
				embedding.provider_id, embedding.model, embedding.dimensions
			)),
		}
	}

	pub(crate) async fn embed_normalized(&self, text: &str) -> Result<Vec<f64>> {
		let texts = [text.to_string()];
		let embeddings =
			self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;
		let Some(vec) = embeddings.into_iter().next() else {
			return Err(Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vec.len() != self.cfg.providers.embedding.dimensions as usize {
			return Err(Error::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vec)
	}
}
