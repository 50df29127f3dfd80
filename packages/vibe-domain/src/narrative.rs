use crate::profile::{Accomplishment, Profile};

/// Upper bound on narrative length, in Unicode codepoints.
pub const NARRATIVE_MAX_CHARS: usize = 1_000;
/// Substituted when a profile yields no clauses at all.
pub const NARRATIVE_PLACEHOLDER: &str = "New 42 student on 42Connect";

const OPENING_FALLBACK: &str = "A new 42 student just joined 42Connect";
const AFFILIATION_CAP: usize = 3;
const ACCOMPLISHMENT_CAP: usize = 5;

/// Assemble the free-text biography for a profile. Deterministic clause
/// order, clauses joined by `". "`, bounded to [`NARRATIVE_MAX_CHARS`].
pub fn build_narrative(profile: &Profile) -> String {
	let mut segments = Vec::new();
	let display = [
		profile.display_name.as_deref(),
		profile.usual_full_name.as_deref(),
		profile.login.as_deref(),
	]
	.into_iter()
	.flatten()
	.find(|value| !value.is_empty());

	match display {
		Some(name) => segments.push(format!("{name} just joined 42Connect")),
		None => segments.push(OPENING_FALLBACK.to_string()),
	}

	if let Some(kind) = profile.kind.as_deref().filter(|value| !value.is_empty()) {
		segments.push(format!("profile type {kind}"));
	}
	if let Some(location) = profile.location.as_deref().filter(|value| !value.is_empty()) {
		segments.push(format!("based in {location}"));
	}

	let campus_names = profile
		.affiliations
		.iter()
		.filter_map(|entry| entry.name.as_deref())
		.filter(|name| !name.is_empty())
		.take(AFFILIATION_CAP)
		.collect::<Vec<_>>();

	if !campus_names.is_empty() {
		segments.push(format!("campus {}", campus_names.join(", ")));
	}

	let highlights = profile
		.accomplishments
		.iter()
		.filter_map(accomplishment_snippet)
		.take(ACCOMPLISHMENT_CAP)
		.collect::<Vec<_>>();

	if !highlights.is_empty() {
		segments.push(format!("projects {}", highlights.join("; ")));
	}

	let narrative = segments.join(". ").trim().to_string();

	if narrative.is_empty() {
		return NARRATIVE_PLACEHOLDER.to_string();
	}

	truncate_marked(narrative)
}

/// `"{name} ({status})"` plus `" mark {mark}"` when a mark is present.
/// Entries missing name or status are dropped without consuming the cap.
fn accomplishment_snippet(entry: &Accomplishment) -> Option<String> {
	let name = entry.name.as_deref().filter(|value| !value.is_empty())?;
	let status = entry.status.as_deref().filter(|value| !value.is_empty())?;
	let mut snippet = format!("{name} ({status})");

	if let Some(mark) = entry.mark {
		snippet.push_str(&format!(" mark {mark}"));
	}

	Some(snippet)
}

fn truncate_marked(value: String) -> String {
	if value.chars().count() <= NARRATIVE_MAX_CHARS {
		return value;
	}

	let mut truncated = value.chars().take(NARRATIVE_MAX_CHARS - 1).collect::<String>();

	truncated.truncate(truncated.trim_end().len());
	truncated.push('…');

	truncated
}
