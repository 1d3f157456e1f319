//! State mirror and simulator link boundary for the simbridge bridge.
//!
//! This crate owns the concurrency-safe side of the bridge: the single
//! authoritative [`StateStore`] mirror, the [`SimulatorLink`] capability
//! trait that the SDK binding implements, and the connection state
//! machine shared by link implementations.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `simbridge.yaml` into
//!   strongly-typed structs.
//! - [`link`] -- The [`SimulatorLink`] and [`PropertySink`] traits, the
//!   Connected/Disconnected state machine, and a recording stub link.
//! - [`sim`] -- [`SimulatedLink`], an in-process link for headless
//!   development and tests.
//! - [`store`] -- The [`StateStore`] mirror with partial-update merge
//!   semantics.
//!
//! [`StateStore`]: store::StateStore
//! [`SimulatorLink`]: link::SimulatorLink
//! [`PropertySink`]: link::PropertySink
//! [`SimulatedLink`]: sim::SimulatedLink

pub mod config;
pub mod link;
pub mod sim;
pub mod store;

pub use config::{BridgeConfig, ConfigError};
pub use link::{ConnectionState, LinkHealth, PropertySink, RecordingLink, SimulatorLink};
pub use sim::SimulatedLink;
pub use store::StateStore;
