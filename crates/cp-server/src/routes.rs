use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use cp_core::{Priority, Source};
use cp_engine::ReloadOutcome;
use cp_model::ModelInfo;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ComplaintRequest {
    pub complaint: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityResponse {
    pub priority: Priority,
    pub source: Source,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub rules_version: String,
    pub model_version: Uuid,
    pub model: ModelInfo,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn predict_routes() -> Router<AppState> {
    Router::new().route("/predict_priority", post(predict_priority))
}

pub fn model_routes() -> Router<AppState> {
    Router::new().route("/api/v1/model/reload", post(reload_model))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let model = state.handle.current().info();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        rules_version: state.engine.rules().version().to_string(),
        model_version: model.version,
        model,
    })
}

async fn predict_priority(
    State(state): State<AppState>,
    payload: Result<Json<ComplaintRequest>, JsonRejection>,
) -> Result<Json<PriorityResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| match e {
        // Well-formed JSON of the wrong shape, e.g. no `complaint` field.
        JsonRejection::JsonDataError(_) => ApiError::unprocessable(e.body_text()),
        _ => ApiError::bad_request(e.body_text()),
    })?;
    let c = state.engine.classify(&req.complaint);
    Ok(Json(PriorityResponse { priority: c.priority, source: c.source }))
}

async fn reload_model(State(state): State<AppState>) -> Result<Json<ReloadOutcome>, ApiError> {
    let outcome = state.handle.reload_from(state.store.as_ref()).await?;
    info!(previous = %outcome.previous, current = %outcome.current, "model reloaded via API");
    Ok(Json(outcome))
}
