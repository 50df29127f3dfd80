use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Result, VibeService};
use vibe_domain::{
	DETERMINISTIC_MODEL_TAG, Profile, build_narrative, deterministic_embedding, normalize_text,
	resolve_uid,
};
use vibe_storage::{
	models::vector_literal,
	queries::{self, UpsertVibe},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvisionRequest {
	pub profile: Profile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProvisionOp {
	Provisioned,
	Skipped,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvisionResponse {
	pub uid: Option<String>,
	pub op: ProvisionOp,
}

impl VibeService {
	/// Ensure a deterministic placeholder vibe exists for the profile.
	///
	/// Runs once per account creation or refresh. A profile without a usable
	/// identifier is skipped, and a storage failure is logged and swallowed:
	/// provisioning is a side effect of the caller's primary workflow and
	/// must never block it. Placeholder rows always carry the deterministic
	/// model tag, whatever embedder the service is configured with; a later
	/// writer with a real model simply overwrites them.
	pub async fn provision_placeholder(&self, req: ProvisionRequest) -> Result<ProvisionResponse> {
		let Some(uid) = resolve_uid(&req.profile) else {
			return Ok(ProvisionResponse { uid: None, op: ProvisionOp::Skipped });
		};
		let narrative = build_narrative(&req.profile);
		let normalized = normalize_text(&narrative);
		let embedding = deterministic_embedding(&normalized);
		let embedding_literal = vector_literal(&embedding);
		let now = OffsetDateTime::now_utc();
		let result = queries::upsert_vibe(
			&self.db,
			UpsertVibe {
				uid: &uid,
				narrative: &narrative,
				normalized_narrative: &normalized,
				embedding_literal: &embedding_literal,
				model_tag: DETERMINISTIC_MODEL_TAG,
				now,
			},
		)
		.await;

		if let Err(err) = result {
			tracing::warn!(uid = %uid, error = %err, "Unable to provision placeholder vibe.");
		}

		Ok(ProvisionResponse { uid: Some(uid), op: ProvisionOp::Provisioned })
	}
}
