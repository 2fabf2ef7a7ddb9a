//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for the five lookup tables and forecasts
//! - Server-side reconciliation of bulk edits
//! - JSON error responses with stable codes

pub mod error;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Deadline applied to every store call.
    pub store_deadline: Duration,
}

impl AppState {
    /// Creates the state from an open pool.
    pub fn new(db: DatabaseConnection, store_deadline: Duration) -> Self {
        Self {
            db: Arc::new(db),
            store_deadline,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
