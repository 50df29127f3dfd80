/// Substituted when normalization strips a text down to nothing.
pub const EMPTY_NORMALIZED_PLACEHOLDER: &str = "new 42 student on 42connect";

/// Full-Unicode lowercase, everything outside `[a-z0-9]` and whitespace
/// replaced by a space, whitespace runs collapsed, trimmed. Total and pure;
/// the output is closed under re-normalization.
pub fn normalize_text(text: &str) -> String {
	let mut replaced = String::with_capacity(text.len());

	for ch in text.chars().flat_map(char::to_lowercase) {
		if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
			replaced.push(ch);
		} else {
			replaced.push(' ');
		}
	}

	let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

	if collapsed.is_empty() {
		return EMPTY_NORMALIZED_PLACEHOLDER.to_string();
	}

	collapsed
}
