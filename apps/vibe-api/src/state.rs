use std::sync::Arc;

use vibe_service::VibeService;
use vibe_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<VibeService>,
}
impl AppState {
	pub async fn new(config: vibe_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema(config.providers.embedding.dimensions).await?;

		let service = VibeService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
