//! Integration tests for the bridge API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The simulator side is a recording stub, so
//! the tests observe exactly which writes the protocol layer forwards.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use simbridge_core::link::{RecordingLink, SimulatorLink};
use simbridge_core::store::StateStore;
use simbridge_server::router::build_router;
use simbridge_server::state::AppState;
use simbridge_types::{PropertyValue, TelemetryField};
use tower::ServiceExt;

fn make_test_state() -> (Arc<AppState>, Arc<RecordingLink>) {
    let link = Arc::new(RecordingLink::new());
    let store = Arc::new(StateStore::new(Arc::clone(&link) as Arc<dyn SimulatorLink>));
    (Arc::new(AppState::new(store)), link)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn default_snapshot_is_all_zeros() {
    let (state, _link) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/state").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["throttle"].as_f64(), Some(0.0));
    assert_eq!(json["mixture"].as_f64(), Some(0.0));
    assert_eq!(json["elevatorTrim"].as_f64(), Some(0.0));
    assert_eq!(json["flapsPositions"].as_i64(), Some(0));
    assert_eq!(json["flapsIndex"].as_i64(), Some(0));
    assert_eq!(json.as_object().map(serde_json::Map::len), Some(5));
}

#[tokio::test]
async fn get_reflects_simulator_notifications() {
    let (state, _link) = make_test_state();
    state
        .store
        .refresh_field(TelemetryField::Throttle, PropertyValue::Real(0.75));
    state
        .store
        .refresh_field(TelemetryField::FlapsPositions, PropertyValue::Integer(4));
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/state").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["throttle"].as_f64(), Some(0.75));
    assert_eq!(json["flapsPositions"].as_i64(), Some(4));
}

#[tokio::test]
async fn post_merges_only_named_fields() {
    let (state, link) = make_test_state();
    link.connect();
    state
        .store
        .refresh_field(TelemetryField::Mixture, PropertyValue::Real(0.3));
    state
        .store
        .refresh_field(TelemetryField::FlapsPositions, PropertyValue::Integer(3));
    state
        .store
        .refresh_field(TelemetryField::FlapsIndex, PropertyValue::Integer(1));
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::post("/state")
                .body(Body::from(r#"{"throttle":0.5}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["throttle"].as_f64(), Some(0.5));
    assert_eq!(json["mixture"].as_f64(), Some(0.3));
    assert_eq!(json["elevatorTrim"].as_f64(), Some(0.0));
    assert_eq!(json["flapsPositions"].as_i64(), Some(3));
    assert_eq!(json["flapsIndex"].as_i64(), Some(1));

    assert_eq!(
        link.writes(),
        vec![(TelemetryField::Throttle, PropertyValue::Real(0.5))]
    );
}

#[tokio::test]
async fn malformed_body_returns_unchanged_snapshot() {
    let (state, link) = make_test_state();
    link.connect();
    state
        .store
        .refresh_field(TelemetryField::Throttle, PropertyValue::Real(0.6));
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::post("/state")
                .body(Body::from("this is not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["throttle"].as_f64(), Some(0.6));
    assert!(link.writes().is_empty());
}

#[tokio::test]
async fn empty_object_body_is_a_noop() {
    let (state, link) = make_test_state();
    link.connect();
    let router = build_router(state);

    let response = router
        .oneshot(Request::post("/state").body(Body::from("{}")).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["throttle"].as_f64(), Some(0.0));
    assert!(link.writes().is_empty());
}

#[tokio::test]
async fn out_of_range_flaps_index_is_accepted() {
    // flapsPositions is still 0; the bridge neither clamps nor rejects.
    let (state, link) = make_test_state();
    link.connect();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::post("/state")
                .body(Body::from(r#"{"flapsIndex":5}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["flapsIndex"].as_i64(), Some(5));
    assert_eq!(json["flapsPositions"].as_i64(), Some(0));
}

#[tokio::test]
async fn disconnected_post_commits_locally_without_writes() {
    let (state, link) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::post("/state")
                .body(Body::from(r#"{"mixture":0.9}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["mixture"].as_f64(), Some(0.9));
    assert!(link.writes().is_empty());
}

#[tokio::test]
async fn unknown_path_names_itself_in_the_404() {
    let (state, _link) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("/nope"), "diagnostic body was {body:?}");
}

#[tokio::test]
async fn unmatched_method_gets_the_same_404() {
    let (state, _link) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::delete("/state").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("/state"));
}
