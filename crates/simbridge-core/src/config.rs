//! Configuration loading and typed config structures for the bridge.
//!
//! The canonical configuration lives in `simbridge.yaml` next to the
//! binary. This module defines strongly-typed structs that mirror the
//! YAML structure and provides a loader that reads the file. Every
//! field has a default, so a missing file or an empty document yields a
//! fully usable configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level bridge configuration.
///
/// Mirrors the structure of `simbridge.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BridgeConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: HttpConfig,

    /// Simulator link settings.
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listener:
    /// `SIMBRIDGE_HOST` overrides `server.host` and `SIMBRIDGE_PORT`
    /// overrides `server.port`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides();
        Ok(config)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl HttpConfig {
    /// Apply `SIMBRIDGE_HOST` / `SIMBRIDGE_PORT` overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var("SIMBRIDGE_HOST").ok(),
            std::env::var("SIMBRIDGE_PORT").ok(),
        );
    }

    fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            match port.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => warn!(port = %port, "ignoring non-numeric SIMBRIDGE_PORT"),
            }
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Simulator link configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulatorConfig {
    /// Milliseconds between simulated telemetry pump cycles.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Whether to attempt the simulator handshake at startup.
    ///
    /// A failed attempt is logged and the bridge serves last-known
    /// (zeroed) state until an explicit reconnect.
    #[serde(default = "default_true")]
    pub auto_connect: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            auto_connect: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

const fn default_update_interval_ms() -> u64 {
    50
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    String::from("info")
}
