use serde::{Deserialize, Serialize};

/// Hard cap on stored uids; mirrors the VARCHAR(255) key column.
pub const UID_MAX_BYTES: usize = 255;

/// Structured profile attributes as supplied by the identity source on
/// account creation or refresh. Everything is optional; provisioning copes
/// with whatever subset is present.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Profile {
	pub login: Option<String>,
	pub email: Option<String>,
	pub display_name: Option<String>,
	pub usual_full_name: Option<String>,
	pub kind: Option<String>,
	pub location: Option<String>,
	#[serde(default)]
	pub affiliations: Vec<Affiliation>,
	#[serde(default)]
	pub accomplishments: Vec<Accomplishment>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Affiliation {
	pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Accomplishment {
	pub name: Option<String>,
	pub status: Option<String>,
	pub mark: Option<f64>,
}

/// Stable external identity: login, else email, truncated to 255 bytes on a
/// char boundary. `None` means the profile cannot be provisioned.
pub fn resolve_uid(profile: &Profile) -> Option<String> {
	let candidate = profile
		.login
		.as_deref()
		.filter(|value| !value.is_empty())
		.or_else(|| profile.email.as_deref().filter(|value| !value.is_empty()))?;

	Some(truncate_bytes(candidate, UID_MAX_BYTES))
}

fn truncate_bytes(value: &str, max: usize) -> String {
	if value.len() <= max {
		return value.to_string();
	}

	let mut end = max;

	while !value.is_char_boundary(end) {
		end -= 1;
	}

	value[..end].to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prefers_login_over_email() {
		let profile = Profile {
			login: Some("ana".to_string()),
			email: Some("ana@example.com".to_string()),
			..Profile::default()
		};

		assert_eq!(resolve_uid(&profile), Some("ana".to_string()));
	}

	#[test]
	fn falls_back_to_email_when_login_is_empty() {
		let profile = Profile {
			login: Some(String::new()),
			email: Some("ana@example.com".to_string()),
			..Profile::default()
		};

		assert_eq!(resolve_uid(&profile), Some("ana@example.com".to_string()));
	}

	#[test]
	fn yields_none_without_identifiers() {
		assert_eq!(resolve_uid(&Profile::default()), None);
	}

	#[test]
	fn truncates_to_255_bytes_on_a_char_boundary() {
		let profile = Profile { login: Some("é".repeat(200)), ..Profile::default() };
		let uid = resolve_uid(&profile).expect("uid expected");

		assert!(uid.len() <= UID_MAX_BYTES);
		assert_eq!(uid.chars().count(), 127);
	}

	#[test]
	fn deserializes_from_identity_payload() {
		let profile: Profile = serde_json::from_str(
			r#"{
				"login": "ana",
				"kind": "student",
				"affiliations": [{ "name": "Paris" }],
				"accomplishments": [{ "name": "libft", "status": "finished", "mark": 125 }]
			}"#,
		)
		.expect("payload should deserialize");

		assert_eq!(profile.login.as_deref(), Some("ana"));
		assert_eq!(profile.accomplishments[0].mark, Some(125.0));
	}
}
