mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingMode, EmbeddingProviderConfig, Postgres, Providers, Ranking, Search, Service,
	Storage,
};

use std::{fs, path::Path};

use vibe_domain::EMBEDDING_DIMENSION;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	let embedding = &cfg.providers.embedding;

	if embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if embedding.mode == EmbeddingMode::Deterministic
		&& embedding.dimensions as usize != EMBEDDING_DIMENSION
	{
		return Err(Error::Validation {
			message: format!(
				"providers.embedding.dimensions must be {EMBEDDING_DIMENSION} in deterministic mode."
			),
		});
	}
	if embedding.mode == EmbeddingMode::External {
		for (label, value) in [
			("providers.embedding.provider_id", &embedding.provider_id),
			("providers.embedding.api_base", &embedding.api_base),
			("providers.embedding.api_key", &embedding.api_key),
			("providers.embedding.path", &embedding.path),
			("providers.embedding.model", &embedding.model),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation {
					message: format!("{label} must be non-empty in external mode."),
				});
			}
		}
	}
	if embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}

	if cfg.search.top_k == 0 {
		return Err(Error::Validation {
			message: "search.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.candidate_k < cfg.search.top_k {
		return Err(Error::Validation {
			message: "search.candidate_k must be at least search.top_k.".to_string(),
		});
	}
	if cfg.search.list_limit == 0 {
		return Err(Error::Validation {
			message: "search.list_limit must be greater than zero.".to_string(),
		});
	}

	for (label, weight) in [
		("ranking.vector_weight", cfg.ranking.vector_weight),
		("ranking.overlap_weight", cfg.ranking.overlap_weight),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if !(0.0..=1.0).contains(&weight) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	if !cfg.ranking.min_score.is_finite() {
		return Err(Error::Validation {
			message: "ranking.min_score must be a finite number.".to_string(),
		});
	}
	if cfg.ranking.min_score < 0.0 {
		return Err(Error::Validation {
			message: "ranking.min_score must be zero or greater.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for value in [
		&mut cfg.providers.embedding.provider_id,
		&mut cfg.providers.embedding.api_base,
		&mut cfg.providers.embedding.path,
		&mut cfg.providers.embedding.model,
	] {
		*value = value.trim().to_string();
	}
}
