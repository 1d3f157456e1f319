//! HTTP API server for the simbridge telemetry bridge.
//!
//! This crate provides an Axum server that exposes the state mirror
//! over one fixed resource path:
//!
//! - `GET /state` -- the current telemetry snapshot
//! - `POST /state` -- merge a sparse update, return the resulting state
//! - everything else -- 404 with a diagnostic naming the path
//!
//! # Error surface
//!
//! By design there is none: a request body that fails to decode is
//! treated as an empty update and answered with the unchanged snapshot,
//! and simulator faults degrade to last-known values. The handlers are
//! infallible; the only failure modes live in server startup.

pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
