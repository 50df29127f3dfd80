use serde::{Deserialize, Serialize};

use crate::{Error, Result, VibeService};
use vibe_storage::{models::VibeRecord, queries};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListRequest {
	/// Defaults to `search.list_limit` from the config.
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VibeSummary {
	pub uid: String,
	pub narrative: String,
	pub normalized_narrative: String,
	pub model_tag: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: time::OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: time::OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub items: Vec<VibeSummary>,
}

impl VibeService {
	/// Most recently updated vibes first.
	pub async fn list(&self, req: ListRequest) -> Result<ListResponse> {
		let limit = req.limit.unwrap_or(self.cfg.search.list_limit);

		if limit == 0 {
			return Err(Error::InvalidRequest {
				message: "limit must be greater than zero.".to_string(),
			});
		}

		let records = queries::list_vibes(&self.db, i64::from(limit)).await?;
		let items = records.into_iter().map(summary).collect();

		Ok(ListResponse { items })
	}

	pub async fn fetch(&self, uid: &str) -> Result<VibeSummary> {
		let uid = uid.trim();

		if uid.is_empty() {
			return Err(Error::InvalidRequest { message: "uid must be non-empty.".to_string() });
		}

		let record = queries::fetch_vibe(&self.db, uid).await?.ok_or_else(|| Error::NotFound {
			message: format!("No vibe stored for uid {uid:?}."),
		})?;

		Ok(summary(record))
	}
}

fn summary(record: VibeRecord) -> VibeSummary {
	VibeSummary {
		uid: record.uid,
		narrative: record.narrative,
		normalized_narrative: record.normalized_narrative,
		model_tag: record.model_tag,
		created_at: record.created_at,
		updated_at: record.updated_at,
	}
}
