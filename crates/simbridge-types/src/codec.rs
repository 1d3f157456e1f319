//! Wire encoding for the bridge HTTP API.
//!
//! The wire shape is a flat JSON object. Encoding always emits exactly
//! the five telemetry keys; decoding accepts any subset of the writable
//! keys and maps a structurally invalid payload to the fully-absent
//! update. The silent fallback is a deliberate contract with the
//! protocol layer, which never surfaces decode errors to clients.

use serde_json::{Value, json};

use crate::telemetry::TelemetryState;
use crate::update::PartialUpdate;

/// Encode a telemetry snapshot as its wire object.
///
/// Emits exactly `{throttle, mixture, elevatorTrim, flapsPositions,
/// flapsIndex}`.
pub fn encode_state(state: &TelemetryState) -> Value {
    json!({
        "throttle": state.throttle,
        "mixture": state.mixture,
        "elevatorTrim": state.elevator_trim,
        "flapsPositions": state.flaps_positions,
        "flapsIndex": state.flaps_index,
    })
}

/// Decode a request body into a [`PartialUpdate`].
///
/// Any of the writable keys present in the payload become present
/// fields; everything else is absent. A body that is not a JSON object
/// of the expected shape decodes to [`PartialUpdate::EMPTY`] rather
/// than an error.
pub fn decode_update(body: &[u8]) -> PartialUpdate {
    serde_json::from_slice(body).unwrap_or_default()
}
