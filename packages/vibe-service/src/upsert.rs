use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, Result, VibeService};
use vibe_domain::{UID_MAX_BYTES, normalize_text};
use vibe_storage::{
	models::vector_literal,
	queries::{self, UpsertVibe},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpsertVibeRequest {
	pub uid: String,
	pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpsertVibeResponse {
	pub uid: String,
	pub model_tag: String,
}

impl VibeService {
	/// Store an operator-authored vibe text for a uid, replacing whatever the
	/// row held before. Unlike placeholder provisioning, failures surface
	/// here: the caller asked for this write explicitly.
	pub async fn upsert_vibe(&self, req: UpsertVibeRequest) -> Result<UpsertVibeResponse> {
		let uid = req.uid.trim();

		if uid.is_empty() {
			return Err(Error::InvalidRequest { message: "uid must be non-empty.".to_string() });
		}
		if uid.len() > UID_MAX_BYTES {
			return Err(Error::InvalidRequest {
				message: format!("uid must be at most {UID_MAX_BYTES} bytes."),
			});
		}

		let narrative = req.text.trim();

		if narrative.is_empty() {
			return Err(Error::InvalidRequest { message: "text must be non-empty.".to_string() });
		}

		let normalized = normalize_text(narrative);
		let embedding = self.embed_normalized(&normalized).await?;
		let embedding_literal = vector_literal(&embedding);
		let model_tag = self.model_tag();
		let now = OffsetDateTime::now_utc();

		queries::upsert_vibe(
			&self.db,
			UpsertVibe {
				uid,
				narrative,
				normalized_narrative: &normalized,
				embedding_literal: &embedding_literal,
				model_tag: model_tag.as_str(),
				now,
			},
		)
		.await?;

		Ok(UpsertVibeResponse { uid: uid.to_string(), model_tag: model_tag.as_str().to_string() })
	}
}
