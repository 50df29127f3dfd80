use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use vibe_service::{
	Error as ServiceError, ListRequest, ListResponse, ProvisionRequest, ProvisionResponse,
	SearchRequest, SearchResponse, UpsertVibeRequest, UpsertVibeResponse, VibeSummary, WipeReport,
};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/vibes/provision", post(provision))
		.route("/v1/vibes", post(upsert).get(list))
		.route("/v1/vibes/{uid}", get(fetch))
		.route("/v1/search", post(search))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/wipe", post(wipe)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn provision(
	State(state): State<AppState>,
	Json(payload): Json<ProvisionRequest>,
) -> Result<Json<ProvisionResponse>, ApiError> {
	let response = state.service.provision_placeholder(payload).await?;

	Ok(Json(response))
}

async fn upsert(
	State(state): State<AppState>,
	Json(payload): Json<UpsertVibeRequest>,
) -> Result<Json<UpsertVibeResponse>, ApiError> {
	let response = state.service.upsert_vibe(payload).await?;

	Ok(Json(response))
}

async fn list(
	State(state): State<AppState>,
	Query(payload): Query<ListRequest>,
) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list(payload).await?;

	Ok(Json(response))
}

async fn fetch(
	State(state): State<AppState>,
	Path(uid): Path<String>,
) -> Result<Json<VibeSummary>, ApiError> {
	let response = state.service.fetch(&uid).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn wipe(State(state): State<AppState>) -> Result<Json<WipeReport>, ApiError> {
	let response = state.service.wipe().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			ServiceError::Provider { .. } => (StatusCode::BAD_GATEWAY, "provider_error"),
			ServiceError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
		};

		Self { status, error_code, message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code.to_string(), message: self.message };

		(self.status, Json(body)).into_response()
	}
}
