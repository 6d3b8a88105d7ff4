//! HTTP API tests for the seating service.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.
//!
//! Run with: `cargo test --test http_api_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use seating_testing::{ledger_with_clock, test_clock};
use seating_web::{AppState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(total_seats: u32) -> Router {
    build_router(AppState::new(ledger_with_clock(total_seats, test_clock()), "Bistro"))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn reserve(app: &Router, name: &str, guests: i64) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/reservations",
        Some(json!({"name": name, "phone": "555-0100", "guest_count": guests})),
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let app = app(50);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_initial_state() {
    let app = app(50);
    let (status, body) = send(&app, "GET", "/state", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["venue_name"], "Bistro");
    assert_eq!(body["total_seats"], 50);
    assert_eq!(body["seats_left"], 50);
    assert_eq!(body["chart"], json!({"taken": 0, "left": 50}));
    assert_eq!(body["reservations"], json!([]));
}

#[tokio::test]
async fn test_reserve_updates_state() {
    let app = app(50);
    let (status, created) = reserve(&app, "Alice", 4).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["guest_count"], 4);
    assert_eq!(created["check_in"], "2025-01-01T00:00:00Z");
    assert_eq!(created["check_out"], Value::Null);
    assert_eq!(created["check_out_label"], "Not Checked Out");
    assert_eq!(created["status"], "Active");
    assert_eq!(created["can_check_out"], true);

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["seats_left"], 46);
    assert_eq!(state["seats_taken"], 4);
    assert_eq!(state["chart"], json!({"taken": 4, "left": 46}));
    assert_eq!(state["reservations"][0]["id"], created["id"]);
}

#[tokio::test]
async fn test_over_capacity_is_conflict() {
    let app = app(50);
    reserve(&app, "Alice", 4).await;

    let (status, body) = reserve(&app, "Bob", 50).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INSUFFICIENT_CAPACITY");

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["seats_left"], 46);
    assert_eq!(state["reservations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_guest_count_beyond_u32_is_conflict() {
    let app = app(50);
    let (status, body) = reserve(&app, "Alice", 5_000_000_000).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INSUFFICIENT_CAPACITY");
    assert_eq!(
        body["message"],
        "Not enough seats available: requested 5000000000, 50 left"
    );
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = app(50);

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(json!({"name": "Alice", "phone": "555-0100", "guest_count": "4"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("guest_count"));

    let request = Request::builder()
        .method("POST")
        .uri("/reservations")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["seats_left"], 50);
}

#[tokio::test]
async fn test_invalid_input_is_unprocessable() {
    let app = app(50);

    for guests in [0, -3] {
        let (status, body) = reserve(&app, "Alice", guests).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let (status, _) = reserve(&app, "   ", 2).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["seats_left"], 50);
}

#[tokio::test]
async fn test_check_out_is_idempotent() {
    let app = app(50);
    let (_, created) = reserve(&app, "Alice", 4).await;
    let uri = format!("/reservations/{}/checkout", created["id"].as_str().unwrap());

    let (status, first) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "CheckedOut");
    assert_eq!(first["can_check_out"], false);
    let checked_out_at =
        chrono::DateTime::parse_from_rfc3339(first["check_out"].as_str().unwrap()).unwrap();
    assert_eq!(first["check_out_label"], checked_out_at.to_rfc3339());

    let (status, second) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["check_out"], first["check_out"]);

    let (_, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(state["seats_left"], 50);
}

#[tokio::test]
async fn test_delete_active_and_checked_out() {
    let app = app(50);
    let (_, alice) = reserve(&app, "Alice", 4).await;
    let (_, bob) = reserve(&app, "Bob", 6).await;
    let alice_id = alice["id"].as_str().unwrap();
    let bob_id = bob["id"].as_str().unwrap();

    send(&app, "POST", &format!("/reservations/{alice_id}/checkout"), None).await;

    let (status, deleted) = send(&app, "DELETE", &format!("/reservations/{alice_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["seats_released"], 0);
    assert_eq!(deleted["seats_left"], 44);

    let (status, deleted) = send(&app, "DELETE", &format!("/reservations/{bob_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["seats_released"], 6);
    assert_eq!(deleted["seats_left"], 50);

    let (_, list) = send(&app, "GET", "/reservations", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = app(50);

    let missing = seating_core::ReservationId::new();
    let (status, body) = send(&app, "DELETE", &format!("/reservations/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = send(&app, "POST", "/reservations/table-7/checkout", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
