use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use vibe_config::EmbeddingProviderConfig;

/// Fetch embeddings for `texts` from an OpenAI-compatible endpoint. Vectors
/// come back in input order, validated against the configured dimension and
/// L2-normalized, so stored rows always hold unit vectors regardless of the
/// provider's own conventions.
pub async fn embed(cfg: &EmbeddingProviderConfig, texts: &[String]) -> Result<Vec<Vec<f64>>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"input": texts,
		"dimensions": cfg.dimensions,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;
	let parsed = parse_embedding_response(json)?;
	let mut out = Vec::with_capacity(parsed.len());

	for vec in parsed {
		out.push(validate_and_normalize(vec, cfg.dimensions as usize)?);
	}

	Ok(out)
}

fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f64>>> {
	let data = json.get("data").and_then(|value| value.as_array()).ok_or_else(|| {
		Error::InvalidResponse { message: "Embedding response is missing data array.".to_string() }
	})?;
	let mut indexed: Vec<(usize, Vec<f64>)> = Vec::with_capacity(data.len());

	for (fallback_index, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(|value| value.as_u64())
			.map(|value| value as usize)
			.unwrap_or(fallback_index);
		let embedding = item.get("embedding").and_then(|value| value.as_array()).ok_or_else(
			|| Error::InvalidResponse {
				message: "Embedding item missing embedding array.".to_string(),
			},
		)?;
		let mut vec = Vec::with_capacity(embedding.len());

		for value in embedding {
			let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
				message: "Embedding value must be numeric.".to_string(),
			})?;

			vec.push(number);
		}

		indexed.push((index, vec));
	}

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, vec)| vec).collect())
}

fn validate_and_normalize(mut vec: Vec<f64>, dimensions: usize) -> Result<Vec<f64>> {
	if vec.len() != dimensions {
		return Err(Error::InvalidResponse {
			message: format!(
				"Embedding dimension mismatch: expected {dimensions}, received {}.",
				vec.len()
			),
		});
	}

	let norm = vec.iter().map(|value| value * value).sum::<f64>().sqrt();

	if norm <= 0.0 {
		return Err(Error::InvalidResponse {
			message: "Embedding norm evaluated to zero; cannot normalize.".to_string(),
		});
	}

	for value in &mut vec {
		*value /= norm;
	}

	Ok(vec)
}
