//! Axum router construction for the bridge API.
//!
//! One resource path, two methods, and a single fallthrough for
//! everything else. CORS is permissive so a browser-hosted panel can
//! poll the bridge directly.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the bridge API.
///
/// The method-level fallback on `/state` matters: an unmatched method
/// must produce the same diagnostic 404 as an unmatched path, not a
/// 405.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/state",
            get(handlers::get_state)
                .post(handlers::post_state)
                .fallback(handlers::unknown_route),
        )
        .fallback(handlers::unknown_route)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
