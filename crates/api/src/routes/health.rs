//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use workcast_shared::AppError;

use crate::{ApiError, AppState};

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler. Fails with `UNAVAILABLE` when the database does not answer.
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    tokio::time::timeout(state.store_deadline, state.db.ping())
        .await
        .map_err(|_| AppError::Unavailable("database ping timed out".to_string()))?
        .map_err(|err| AppError::Unavailable(err.to_string()))?;

    Ok(Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
