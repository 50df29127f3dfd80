use std::{cmp::Ordering, collections::HashSet};

use crate::search::SearchItem;

/// Whitespace tokens of a normalized query, deduplicated, first-appearance
/// order preserved. Overlap terms inherit this order.
pub fn query_tokens(normalized_query: &str) -> Vec<String> {
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	for token in normalized_query.split_whitespace() {
		if seen.insert(token) {
			out.push(token.to_string());
		}
	}

	out
}

/// Query tokens present in the candidate's normalized narrative.
pub fn overlap_terms(query_tokens: &[String], normalized_narrative: &str) -> Vec<String> {
	let narrative_terms: HashSet<&str> = normalized_narrative.split_whitespace().collect();

	query_tokens
		.iter()
		.filter(|token| narrative_terms.contains(token.as_str()))
		.cloned()
		.collect()
}

/// Cosine distance from the store, clamped into a [0, 1] similarity.
pub fn similarity_from_distance(distance: f64) -> f64 {
	(1.0 - distance).max(0.0)
}

/// The blend turning both signals into one display score. Vector similarity
/// is the primary signal, lexical overlap an explanatory boost; the weights
/// are tunable through `[ranking]` and the whole function is meant to be
/// replaced once a better-calibrated formula exists.
pub fn combined_score(
	similarity: f64,
	lexical_overlap: f64,
	ranking: &vibe_config::Ranking,
) -> f64 {
	ranking.vector_weight * similarity + ranking.overlap_weight * lexical_overlap
}

/// Total order for results: score desc, overlap-term count desc, uid asc.
pub fn compare(a: &SearchItem, b: &SearchItem) -> Ordering {
	b.score
		.total_cmp(&a.score)
		.then_with(|| b.overlap_terms.len().cmp(&a.overlap_terms.len()))
		.then_with(|| a.uid.cmp(&b.uid))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ranking() -> vibe_config::Ranking {
		vibe_config::Ranking { vector_weight: 0.85, overlap_weight: 0.15, min_score: 0.0 }
	}

	fn item(uid: &str, score: f64, overlap: &[&str]) -> SearchItem {
		SearchItem {
			uid: uid.to_string(),
			narrative: String::new(),
			normalized_narrative: String::new(),
			model_tag: String::new(),
			distance: 0.0,
			similarity: 0.0,
			lexical_overlap: 0.0,
			score,
			overlap_terms: overlap.iter().map(ToString::to_string).collect(),
			formatted_score: String::new(),
		}
	}

	#[test]
	fn overlap_keeps_query_order_and_dedupes() {
		let tokens = query_tokens("ocean breeze ocean");

		assert_eq!(tokens, ["ocean", "breeze"]);

		let terms = overlap_terms(&tokens, "a calm ocean breeze today");

		assert_eq!(terms, ["ocean", "breeze"]);
	}

	#[test]
	fn overlap_requires_whole_tokens() {
		let tokens = query_tokens("ocean bree");

		assert_eq!(overlap_terms(&tokens, "a calm ocean breeze today"), ["ocean"]);
	}

	#[test]
	fn similarity_clamps_at_zero() {
		assert_eq!(similarity_from_distance(0.1), 0.9);
		assert_eq!(similarity_from_distance(1.7), 0.0);
	}

	#[test]
	fn score_blends_with_configured_weights() {
		let score = combined_score(1.0, 0.5, &ranking());

		assert!((score - 0.925).abs() < 1e-12);
	}

	#[test]
	fn ties_break_by_overlap_count_then_uid() {
		let mut items = vec![
			item("b", 0.5, &[]),
			item("a", 0.5, &[]),
			item("c", 0.5, &["ocean"]),
			item("d", 0.9, &[]),
		];

		items.sort_by(compare);

		let uids = items.iter().map(|item| item.uid.as_str()).collect::<Vec<_>>();

		assert_eq!(uids, ["d", "c", "a", "b"]);
	}
}
