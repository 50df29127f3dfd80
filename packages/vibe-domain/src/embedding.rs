use sha2::{Digest, Sha512};

/// Fixed embedding dimension shared by every record in the store.
pub const EMBEDDING_DIMENSION: usize = 1_536;
/// Stored tag for vectors produced by [`deterministic_embedding`].
pub const DETERMINISTIC_MODEL_TAG: &str = "fallback-sha512-1536";

const EMPTY_TEXT_SEED: &str = "42connect-vibes";

/// Which embedding producer wrote a record. Rows tagged with an external
/// model overwrite deterministic fallbacks and vice versa; latest writer
/// wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelTag {
	DeterministicFallback,
	External(String),
}

impl ModelTag {
	pub fn as_str(&self) -> &str {
		match self {
			Self::DeterministicFallback => DETERMINISTIC_MODEL_TAG,
			Self::External(tag) => tag.as_str(),
		}
	}

	pub fn from_stored(tag: &str) -> Self {
		if tag == DETERMINISTIC_MODEL_TAG {
			Self::DeterministicFallback
		} else {
			Self::External(tag.to_string())
		}
	}
}

impl std::fmt::Display for ModelTag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Derive a unit-length vector from normalized text via SHA-512 hash
/// expansion. Reproducible across processes and conforming implementations;
/// the vector carries no semantic meaning. It only guarantees that every
/// profile has an embedding before a learned model writes the row.
pub fn deterministic_embedding(text: &str) -> Vec<f64> {
	let seed = if text.is_empty() {
		Sha512::digest(EMPTY_TEXT_SEED.as_bytes())
	} else {
		Sha512::digest(text.as_bytes())
	};
	let mut vector = Vec::with_capacity(EMBEDDING_DIMENSION);
	let mut counter: u32 = 0;

	while vector.len() < EMBEDDING_DIMENSION {
		let mut hasher = Sha512::new();

		hasher.update(&seed);
		hasher.update(counter.to_be_bytes());

		for chunk in hasher.finalize().chunks(4) {
			if vector.len() >= EMBEDDING_DIMENSION {
				break;
			}

			// A trailing partial chunk is zero-padded, not discarded.
			let mut bytes = [0_u8; 4];

			bytes[..chunk.len()].copy_from_slice(chunk);

			let scaled = f64::from(u32::from_be_bytes(bytes) % 2_000_000) / 1_000_000.0 - 1.0;

			vector.push(scaled);
		}

		counter += 1;
	}

	let norm = l2_norm(&vector);

	if norm <= 0.0 {
		return unit_fallback();
	}

	for value in &mut vector {
		*value /= norm;
	}

	vector
}

/// Euclidean norm.
pub fn l2_norm(vector: &[f64]) -> f64 {
	vector.iter().map(|value| value * value).sum::<f64>().sqrt()
}

fn unit_fallback() -> Vec<f64> {
	let mut vector = vec![0.0; EMBEDDING_DIMENSION];

	vector[0] = 1.0;

	vector
}
