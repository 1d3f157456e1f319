//! The mirrored telemetry snapshot.
//!
//! [`TelemetryState`] is the bridge's in-process copy of the simulator's
//! control-surface values. It is plain data: the concurrency discipline
//! around it lives in the state store, not here.

use serde::{Deserialize, Serialize};

use crate::fields::{PropertyValue, TelemetryField};

/// A point-in-time copy of the mirrored control-surface values.
///
/// Created zero-valued at process start and mutated field-by-field as
/// simulator notifications and client updates arrive. The intended
/// `0 <= flaps_index < flaps_positions` relation is deliberately not
/// enforced anywhere; the simulator is the authority and callers may
/// push values the airframe would reject.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryState {
    /// Throttle lever position, fraction of full travel.
    pub throttle: f64,
    /// Mixture lever position, fraction of full travel.
    pub mixture: f64,
    /// Elevator trim deflection in radians.
    pub elevator_trim: f64,
    /// Number of discrete flap settings reported by the simulator.
    pub flaps_positions: i64,
    /// Current discrete flap setting.
    pub flaps_index: i64,
}

impl TelemetryState {
    /// Overwrite one field with a kind-matched value.
    ///
    /// A value whose kind does not match the channel is ignored; the
    /// bridge never coerces between reals and integers.
    pub const fn set_field(&mut self, field: TelemetryField, value: PropertyValue) {
        match (field, value) {
            (TelemetryField::Throttle, PropertyValue::Real(v)) => self.throttle = v,
            (TelemetryField::Mixture, PropertyValue::Real(v)) => self.mixture = v,
            (TelemetryField::ElevatorTrim, PropertyValue::Real(v)) => self.elevator_trim = v,
            (TelemetryField::FlapsPositions, PropertyValue::Integer(v)) => {
                self.flaps_positions = v;
            }
            (TelemetryField::FlapsIndex, PropertyValue::Integer(v)) => self.flaps_index = v,
            // Kind mismatch: leave the mirror untouched.
            _ => {}
        }
    }

    /// Read one field as a typed property value.
    pub const fn field(&self, field: TelemetryField) -> PropertyValue {
        match field {
            TelemetryField::Throttle => PropertyValue::Real(self.throttle),
            TelemetryField::Mixture => PropertyValue::Real(self.mixture),
            TelemetryField::ElevatorTrim => PropertyValue::Real(self.elevator_trim),
            TelemetryField::FlapsPositions => PropertyValue::Integer(self.flaps_positions),
            TelemetryField::FlapsIndex => PropertyValue::Integer(self.flaps_index),
        }
    }
}
