//! Shared type definitions for the simbridge telemetry bridge.
//!
//! This crate is the single source of truth for the data model that flows
//! between the simulator link, the state store, and the HTTP API.
//!
//! # Modules
//!
//! - [`fields`] -- Property channel identifiers, kinds, and typed values
//! - [`telemetry`] -- The mirrored [`TelemetryState`] snapshot
//! - [`update`] -- The sparse [`PartialUpdate`] client command
//! - [`codec`] -- Wire encoding/decoding for the HTTP API
//!
//! [`TelemetryState`]: telemetry::TelemetryState
//! [`PartialUpdate`]: update::PartialUpdate

pub mod codec;
pub mod fields;
pub mod telemetry;
pub mod update;

// Re-export all public types at crate root for convenience.
pub use codec::{decode_update, encode_state};
pub use fields::{PropertyKind, PropertyValue, TelemetryField};
pub use telemetry::TelemetryState;
pub use update::PartialUpdate;
