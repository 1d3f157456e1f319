//! Shared application state for the bridge API server.

use std::sync::Arc;

use simbridge_core::StateStore;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// handlers do not serialize requests among themselves; the store's own
/// lock is the only serialization point, so independent connections may
/// be dispatched concurrently.
#[derive(Clone)]
pub struct AppState {
    /// The authoritative telemetry mirror.
    pub store: Arc<StateStore>,
}

impl AppState {
    /// Create application state backed by the given store.
    pub const fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }
}
