use serde::{Deserialize, Serialize};

use crate::{Error, Result, VibeService, ranking};
use vibe_domain::normalize_text;
use vibe_storage::{models::vector_literal, queries};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	/// Defaults to `search.top_k` from the config.
	pub top_k: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchItem {
	pub uid: String,
	pub narrative: String,
	pub normalized_narrative: String,
	pub model_tag: String,
	pub distance: f64,
	pub similarity: f64,
	pub lexical_overlap: f64,
	pub score: f64,
	pub overlap_terms: Vec<String>,
	pub formatted_score: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SearchItem>,
}

impl VibeService {
	/// Rank stored vibes against a free-text query. Vector similarity comes
	/// from the store's cosine lookup over `candidate_k` nearest rows;
	/// lexical overlap reorders and explains the result. Zero matches is a
	/// valid outcome; storage and provider failures are errors here, since a
	/// failed search has no usable result.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let top_k = req.top_k.unwrap_or(self.cfg.search.top_k);

		if top_k == 0 {
			return Err(Error::InvalidRequest {
				message: "top_k must be greater than zero.".to_string(),
			});
		}

		let normalized_query = normalize_text(query);
		let embedding = self.embed_normalized(&normalized_query).await?;
		let embedding_literal = vector_literal(&embedding);
		let candidate_k = self.cfg.search.candidate_k.max(top_k);
		let neighbors =
			queries::nearest_vibes(&self.db, &embedding_literal, i64::from(candidate_k)).await?;
		let query_tokens = ranking::query_tokens(&normalized_query);
		let mut results = neighbors
			.into_iter()
			.map(|neighbor| {
				let overlap_terms =
					ranking::overlap_terms(&query_tokens, &neighbor.normalized_narrative);
				let similarity = ranking::similarity_from_distance(neighbor.distance);
				let lexical_overlap = if query_tokens.is_empty() {
					0.0
				} else {
					overlap_terms.len() as f64 / query_tokens.len() as f64
				};
				let score = ranking::combined_score(similarity, lexical_overlap, &self.cfg.ranking);

				SearchItem {
					uid: neighbor.uid,
					narrative: neighbor.narrative,
					normalized_narrative: neighbor.normalized_narrative,
					model_tag: neighbor.model_tag,
					distance: neighbor.distance,
					similarity,
					lexical_overlap,
					score,
					overlap_terms,
					formatted_score: format_score(score, similarity, lexical_overlap),
				}
			})
			.collect::<Vec<_>>();

		if self.cfg.ranking.min_score > 0.0 {
			results.retain(|item| item.score >= self.cfg.ranking.min_score);
		}

		results.sort_by(ranking::compare);
		results.truncate(top_k as usize);

		Ok(SearchResponse { results })
	}
}

fn format_score(score: f64, similarity: f64, lexical_overlap: f64) -> String {
	format!("{score:.3} (cosine {similarity:.3}, lexical {lexical_overlap:.3})")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn formats_scores_for_display() {
		assert_eq!(format_score(0.925, 1.0, 0.5), "0.925 (cosine 1.000, lexical 0.500)");
	}
}
