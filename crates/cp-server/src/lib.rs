//! Complaint priority HTTP API server (Axum).
//!
//! `POST /predict_priority` answers `{priority, source}` for one complaint.
//! Health and model reload live alongside it.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;
use tracing::info;

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::predict_routes())
        .merge(routes::model_routes())
        .with_state(state)
}

/// Bind `addr` and serve until the process stops.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, model = %state.handle.version(), "complaint priority server listening");
    axum::serve(listener, app_with_state(state)).await?;
    Ok(())
}
