//! Error types for the bridge binary.
//!
//! [`BridgeError`] is the top-level error type that wraps the failure
//! modes of startup. Once the server is serving there is nothing left
//! to fail: the protocol layer is infallible by design.

/// Top-level error for the bridge binary.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: simbridge_core::config::ConfigError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: simbridge_server::server::ServerError,
    },
}
