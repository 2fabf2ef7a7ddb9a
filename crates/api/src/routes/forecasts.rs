//! Forecast routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use axum_extra::extract::WithRejection;
use workcast_core::forecast::{AmountUpdate, Forecast, ForecastDetail, ForecastSummary, NewForecast};
use workcast_core::reconcile::ReconcileReport;
use workcast_db::ForecastRepository;
use workcast_shared::types::{ForecastId, PageRequest};

use super::reconcile::{self, ReconcileRequest};
use crate::{ApiError, AppState};

/// Creates the forecast routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/forecasts", get(list_detail).post(create_forecast))
        .route("/forecasts/summary", get(summary))
        .route("/forecasts/reconcile", post(reconcile_forecasts))
        .route(
            "/forecasts/{id}",
            put(update_amount).delete(delete_forecast),
        )
}

fn repository(state: &AppState) -> ForecastRepository {
    ForecastRepository::new((*state.db).clone(), state.store_deadline)
}

/// GET /forecasts - Denormalized rows for the dashboard grid.
async fn list_detail(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<Json<Vec<ForecastDetail>>, ApiError> {
    Ok(Json(repository(&state).list_detail(page).await?))
}

/// GET /forecasts/summary - Totals for the dashboard header and charts.
async fn summary(State(state): State<AppState>) -> Result<Json<ForecastSummary>, ApiError> {
    Ok(Json(repository(&state).summary().await?))
}

/// POST /forecasts - Create a forecast.
async fn create_forecast(
    State(state): State<AppState>,
    WithRejection(Json(forecast), _): WithRejection<Json<NewForecast>, ApiError>,
) -> Result<Json<Forecast>, ApiError> {
    Ok(Json(repository(&state).create(forecast).await?))
}

/// PUT `/forecasts/{id}` - Change the amount. Nothing else is writable.
async fn update_amount(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<ForecastId>, ApiError>,
    WithRejection(Json(update), _): WithRejection<Json<AmountUpdate>, ApiError>,
) -> Result<Json<Forecast>, ApiError> {
    Ok(Json(repository(&state).update_amount(id, update).await?))
}

/// DELETE `/forecasts/{id}` - Delete a forecast and return its last value.
async fn delete_forecast(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<ForecastId>, ApiError>,
) -> Result<Json<Forecast>, ApiError> {
    Ok(Json(repository(&state).delete(id).await?))
}

/// POST /forecasts/reconcile - Apply a bulk edit of the detail grid.
async fn reconcile_forecasts(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<
        Json<ReconcileRequest<ForecastDetail>>,
        ApiError,
    >,
) -> Json<ReconcileReport<ForecastId>> {
    let repo = repository(&state);
    Json(reconcile::run("/forecasts", &repo, request).await)
}
