pub mod embedding;
pub mod narrative;
pub mod normalize;
pub mod profile;

pub use embedding::{
	DETERMINISTIC_MODEL_TAG, EMBEDDING_DIMENSION, ModelTag, deterministic_embedding,
};
pub use narrative::{NARRATIVE_MAX_CHARS, NARRATIVE_PLACEHOLDER, build_narrative};
pub use normalize::{EMPTY_NORMALIZED_PLACEHOLDER, normalize_text};
pub use profile::{Accomplishment, Affiliation, Profile, UID_MAX_BYTES, resolve_uid};
