//! API route definitions.

use axum::Router;
use workcast_db::repositories::{Clients, Origins, Units, Verticals, WorkTypes};

use crate::AppState;

pub mod forecasts;
pub mod health;
pub mod lookups;
pub mod reconcile;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(lookups::routes::<Verticals>())
        .merge(lookups::routes::<Units>())
        .merge(lookups::routes::<Clients>())
        .merge(lookups::routes::<Origins>())
        .merge(lookups::routes::<WorkTypes>())
        .merge(forecasts::routes())
}
