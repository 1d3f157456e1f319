//! Endpoint handlers for the bridge API.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/state` | Current telemetry snapshot |
//! | `POST` | `/state` | Merge a sparse update, return the result |
//! | any | anything else | 404 naming the requested path |
//!
//! The handlers never fail. A `POST` body that does not decode is a
//! request for no changes and is answered with the unchanged snapshot;
//! this silent fallback is the protocol contract, not an oversight.

// Axum requires async handlers; the store's lock is synchronous.
#![allow(clippy::unused_async)]

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use simbridge_types::{decode_update, encode_state};
use tracing::debug;

use crate::state::AppState;

/// Serve the current telemetry snapshot.
pub async fn get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(encode_state(&state.store.snapshot()))
}

/// Merge a sparse update into the mirror and serve the result.
///
/// The body is decoded through the codec's silent-fallback path: a
/// structurally invalid payload becomes the empty update, which makes
/// this a read. The response is always the full resulting state.
pub async fn post_state(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let update = decode_update(&body);
    debug!(
        bytes = body.len(),
        fields = update.entries().count(),
        "state update received"
    );
    Json(encode_state(&state.store.apply_update(&update)))
}

/// The contractual unknown-resource response.
///
/// Installed as the fallback for both unmatched paths and unmatched
/// methods on `/state`, so every request that no handler claims lands
/// here.
pub async fn unknown_route(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        format!("no route for \"{}\"", uri.path()),
    )
}
