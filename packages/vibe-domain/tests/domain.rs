use vibe_domain::{
	EMBEDDING_DIMENSION, Profile, build_narrative, deterministic_embedding, embedding::l2_norm,
	normalize_text, resolve_uid,
};

#[test]
fn provisioning_pipeline_is_deterministic() {
	let profile = Profile {
		login: Some("abc".to_string()),
		display_name: Some("Ana".to_string()),
		kind: Some("student".to_string()),
		location: Some("Paris".to_string()),
		..Profile::default()
	};

	assert_eq!(resolve_uid(&profile), Some("abc".to_string()));

	let narrative = build_narrative(&profile);

	assert_eq!(narrative, "Ana just joined 42Connect. profile type student. based in Paris");

	let normalized = normalize_text(&narrative);

	assert_eq!(normalized, "ana just joined 42connect profile type student based in paris");

	let vector = deterministic_embedding(&normalized);

	assert_eq!(vector.len(), EMBEDDING_DIMENSION);
	assert!((l2_norm(&vector) - 1.0).abs() < 1e-9);
	assert_eq!(vector, deterministic_embedding(&normalize_text(&narrative)));
}

#[test]
fn normalization_is_closed_over_narratives() {
	let profile = Profile {
		display_name: Some("José Álvarez".to_string()),
		location: Some("São Paulo".to_string()),
		..Profile::default()
	};
	let normalized = normalize_text(&build_narrative(&profile));

	assert_eq!(normalize_text(&normalized), normalized);
	assert!(normalized.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == ' '));
}

#[test]
fn oversized_narratives_stay_bounded_after_normalization() {
	let profile = Profile { display_name: Some("na".repeat(800)), ..Profile::default() };
	let narrative = build_narrative(&profile);

	assert!(narrative.chars().count() <= 1_000);
	assert!(narrative.ends_with('…'));
	// The truncation mark is not alphanumeric, so it never leaks into the
	// normalized form.
	assert!(!normalize_text(&narrative).contains('…'));
}
