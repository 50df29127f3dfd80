use serde::{Deserialize, Serialize};

use crate::{Result, VibeService};
use vibe_storage::queries;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WipeReport {
	pub removed: u64,
}

impl VibeService {
	/// Delete every stored vibe. Admin-only; exposed on the loopback admin
	/// listener and the management CLI.
	pub async fn wipe(&self) -> Result<WipeReport> {
		let removed = queries::wipe_vibes(&self.db).await?;

		tracing::info!(removed, "Wiped vibe store.");

		Ok(WipeReport { removed })
	}
}
