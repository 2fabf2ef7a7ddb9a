//! HTTP tests for the REST surface.
//!
//! Each test builds the full router over a fresh in-memory SQLite database.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};
use tower::ServiceExt;
use workcast_api::{AppState, create_router};
use workcast_db::migration::Migrator;

async fn app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    create_router(AppState::new(db, Duration::from_secs(5)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Creates one row of every lookup kind and returns their ids.
async fn seed(app: &Router) -> (i64, i64, i64, i64) {
    let (_, vertical) = send(
        app,
        "POST",
        "/verticals",
        Some(json!({"business_vertical_name": "Technology"})),
    )
    .await;
    let vertical_id = vertical["business_vertical_id"].as_i64().unwrap();

    let (_, unit) = send(
        app,
        "POST",
        "/units",
        Some(json!({
            "business_unit_name": "Consulting Services",
            "business_vertical_id": vertical_id,
        })),
    )
    .await;
    let unit_id = unit["business_unit_id"].as_i64().unwrap();

    let (_, client) = send(
        app,
        "POST",
        "/clients",
        Some(json!({
            "client_name": "Acme Corp",
            "client_start_date": "2023-01-01",
            "business_unit_id": unit_id,
        })),
    )
    .await;
    let client_id = client["client_id"].as_i64().unwrap();

    let (_, origin) = send(
        app,
        "POST",
        "/work_type_origin_types",
        Some(json!({"work_type_origin_type_name": "Client Request"})),
    )
    .await;
    let (_, work_type) = send(
        app,
        "POST",
        "/work_types",
        Some(json!({
            "work_type_name": "Consulting",
            "work_type_origin_type_id": origin["work_type_origin_type_id"],
        })),
    )
    .await;
    let work_type_id = work_type["work_type_id"].as_i64().unwrap();

    (vertical_id, unit_id, client_id, work_type_id)
}

fn forecast_body(ids: (i64, i64, i64, i64), dt: &str, amount: i64) -> Value {
    let (_, unit_id, client_id, work_type_id) = ids;
    json!({
        "client_id": client_id,
        "business_unit_id": unit_id,
        "work_type_id": work_type_id,
        "dt": dt,
        "forecast_amount": amount,
    })
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_lookup_crud_round() {
    let app = app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/verticals",
        Some(json!({"business_vertical_name": "Finance"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["business_vertical_id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/verticals/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/verticals/{id}"),
        Some(json!({"business_vertical_id": id, "business_vertical_name": "Financial Services"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["business_vertical_name"], "Financial Services");

    let (status, deleted) = send(&app, "DELETE", &format!("/verticals/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, updated);

    let (status, body) = send(&app, "GET", &format!("/verticals/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_pagination() {
    let app = app().await;
    for name in ["Technology", "Finance", "Healthcare"] {
        send(
            &app,
            "POST",
            "/verticals",
            Some(json!({"business_vertical_name": name})),
        )
        .await;
    }

    let (status, page) = send(&app, "GET", "/verticals?offset=1&limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["business_vertical_name"], "Finance");

    let (_, all) = send(&app, "GET", "/verticals", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_out_of_range_pagination_is_validation_error() {
    let app = app().await;

    for uri in [
        "/verticals?limit=18446744073709551615",
        "/verticals?offset=9223372036854775808",
        "/forecasts?limit=4294967296",
        "/verticals?limit=-1",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "VALIDATION_ERROR", "{uri}");
    }

    let (status, page) = send(
        &app,
        "GET",
        "/verticals?offset=4294967295&limit=4294967295",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page, json!([]));
}

#[tokio::test]
async fn test_store_errors_map_to_codes() {
    let app = app().await;
    let ids = seed(&app).await;
    let (vertical_id, ..) = ids;

    let (status, body) = send(
        &app,
        "POST",
        "/verticals",
        Some(json!({"business_vertical_name": "Technology"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DUPLICATE_NAME");

    let (status, body) = send(
        &app,
        "POST",
        "/units",
        Some(json!({"business_unit_name": "Orphan", "business_vertical_id": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INVALID_REFERENCE");

    let (status, body) = send(&app, "DELETE", &format!("/verticals/{vertical_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "REFERENCED_BY_CHILD");

    let (status, body) = send(
        &app,
        "POST",
        "/verticals",
        Some(json!({"business_vertical_name": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_input_is_validation_error() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/verticals", Some(json!({"name": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, body) = send(&app, "GET", "/verticals/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_forecast_lifecycle() {
    let app = app().await;
    let ids = seed(&app).await;

    let (status, created) = send(
        &app,
        "POST",
        "/forecasts",
        Some(forecast_body(ids, "2025-11-01", 10_000)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["forecast_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/forecasts",
        Some(forecast_body(ids, "2025-11-01", 5)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DUPLICATE_FORECAST");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/forecasts/{id}"),
        Some(json!({"forecast_amount": 12_500})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["forecast_amount"], 12_500);
    assert_eq!(updated["dt"], created["dt"]);
    assert_eq!(updated["client_id"], created["client_id"]);

    let (status, rows) = send(&app, "GET", "/forecasts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows[0]["business_vertical_name"], "Technology");
    assert_eq!(rows[0]["client_name"], "Acme Corp");
    assert_eq!(rows[0]["forecast_amount"], 12_500);

    let (status, summary) = send(&app, "GET", "/forecasts/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["forecast_count"], 1);
    assert_eq!(summary["total_amount"], 12_500);

    let (status, _) = send(&app, "DELETE", &format!("/forecasts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "DELETE", &format!("/forecasts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_forecast_rejects_negative_amount() {
    let app = app().await;
    let ids = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/forecasts",
        Some(forecast_body(ids, "2025-11-01", -1)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_forecast_reconcile_endpoint() {
    let app = app().await;
    let ids = seed(&app).await;
    for (dt, amount) in [("2025-10-01", 100), ("2025-11-01", 200), ("2025-12-01", 300)] {
        send(&app, "POST", "/forecasts", Some(forecast_body(ids, dt, amount))).await;
    }

    let (_, original) = send(&app, "GET", "/forecasts", None).await;
    let mut edited = original.as_array().unwrap().clone();
    edited[0]["forecast_amount"] = json!(150);
    edited.remove(1);
    let mut stray = edited[0].clone();
    stray["forecast_id"] = json!(9_999);
    edited.push(stray);

    let (status, report) = send(
        &app,
        "POST",
        "/forecasts/reconcile",
        Some(json!({"original": original, "edited": edited})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["outcome"], "applied");
    assert_eq!(report["updated"], 1);
    assert_eq!(report["deleted"], 1);
    assert_eq!(report["ignored_new_rows"], json!([9_999]));

    let (_, after) = send(&app, "GET", "/forecasts", None).await;
    let amounts: Vec<_> = after
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["forecast_amount"].as_i64().unwrap())
        .collect();
    assert_eq!(amounts, [150, 300]);
}

#[tokio::test]
async fn test_lookup_reconcile_no_changes() {
    let app = app().await;
    seed(&app).await;

    let (_, clients) = send(&app, "GET", "/clients", None).await;
    let (status, report) = send(
        &app,
        "POST",
        "/clients/reconcile",
        Some(json!({"original": clients, "edited": clients})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["outcome"], "no_changes");
    assert_eq!(report["failures"], json!([]));
}

#[tokio::test]
async fn test_lookup_reconcile_reports_failures() {
    let app = app().await;
    let (vertical_id, ..) = seed(&app).await;
    send(
        &app,
        "POST",
        "/verticals",
        Some(json!({"business_vertical_name": "Finance"})),
    )
    .await;

    let (_, original) = send(&app, "GET", "/verticals", None).await;
    // Drop the referenced vertical and rename the other one.
    let edited = json!([
        {"business_vertical_id": original[1]["business_vertical_id"], "business_vertical_name": "Banking"}
    ]);

    let (status, report) = send(
        &app,
        "POST",
        "/verticals/reconcile",
        Some(json!({"original": original, "edited": edited})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["outcome"], "partial");
    assert_eq!(report["updated"], 1);
    assert_eq!(report["deleted"], 0);
    assert_eq!(report["failures"][0]["id"], vertical_id);
    assert_eq!(report["failures"][0]["operation"], "delete");
    assert_eq!(report["failures"][0]["code"], "REFERENCED_BY_CHILD");
}

#[tokio::test]
async fn test_reconcile_rejects_unparseable_rows() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/forecasts/reconcile",
        Some(json!({"original": [], "edited": [{"forecast_amount": 1}]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
