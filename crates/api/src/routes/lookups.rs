//! CRUD and reconcile routes shared by the five lookup tables.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use workcast_core::reconcile::ReconcileReport;
use workcast_db::repositories::{Clients, Lookup, LookupRepository, Origins, Units, Verticals, WorkTypes};
use workcast_shared::AppError;
use workcast_shared::types::PageRequest;

use super::reconcile::{self, ReconcileRequest};
use crate::{ApiError, AppState};

/// A lookup table exposed under its own path.
pub trait Resource: Lookup<Id: Serialize + DeserializeOwned> {
    /// Collection path, e.g. `/verticals`.
    const PATH: &'static str;
}

impl Resource for Verticals {
    const PATH: &'static str = "/verticals";
}

impl Resource for Units {
    const PATH: &'static str = "/units";
}

impl Resource for Clients {
    const PATH: &'static str = "/clients";
}

impl Resource for Origins {
    const PATH: &'static str = "/work_type_origin_types";
}

impl Resource for WorkTypes {
    const PATH: &'static str = "/work_types";
}

/// Creates the routes for one lookup table.
pub fn routes<L: Resource>() -> Router<AppState> {
    Router::new()
        .route(L::PATH, get(list::<L>).post(create::<L>))
        .route(
            &format!("{}/{{id}}", L::PATH),
            get(get_one::<L>).put(update::<L>).delete(remove::<L>),
        )
        .route(&format!("{}/reconcile", L::PATH), post(reconcile_rows::<L>))
}

fn repository<L: Lookup>(state: &AppState) -> LookupRepository<L> {
    LookupRepository::new((*state.db).clone(), state.store_deadline)
}

/// GET `/{resource}` - List rows in id order.
async fn list<L: Resource>(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<Json<Vec<L::Record>>, ApiError> {
    Ok(Json(repository::<L>(&state).list(page).await?))
}

/// GET `/{resource}/{id}` - Fetch one row.
async fn get_one<L: Resource>(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<L::Id>, ApiError>,
) -> Result<Json<L::Record>, ApiError> {
    repository::<L>(&state)
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError(AppError::NotFound(format!("{} {id} not found", L::LABEL))))
}

/// POST `/{resource}` - Create a row.
async fn create<L: Resource>(
    State(state): State<AppState>,
    WithRejection(Json(draft), _): WithRejection<Json<L::Draft>, ApiError>,
) -> Result<Json<L::Record>, ApiError> {
    Ok(Json(repository::<L>(&state).create(draft).await?))
}

/// PUT `/{resource}/{id}` - Replace every mutable field.
async fn update<L: Resource>(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<L::Id>, ApiError>,
    WithRejection(Json(row), _): WithRejection<Json<L::Draft>, ApiError>,
) -> Result<Json<L::Record>, ApiError> {
    Ok(Json(repository::<L>(&state).update(id, row.into()).await?))
}

/// DELETE `/{resource}/{id}` - Delete a row and return its last value.
async fn remove<L: Resource>(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<L::Id>, ApiError>,
) -> Result<Json<L::Record>, ApiError> {
    Ok(Json(repository::<L>(&state).delete(id).await?))
}

/// POST `/{resource}/reconcile` - Apply a bulk edit.
async fn reconcile_rows<L: Resource>(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<ReconcileRequest<L::Record>>, ApiError>,
) -> Json<ReconcileReport<L::Id>> {
    let repo = repository::<L>(&state);
    Json(reconcile::run(L::PATH, &repo, request).await)
}
