//! The sparse client command type.
//!
//! A [`PartialUpdate`] names which fields to change and leaves the rest
//! alone. Absence is meaningful: `None` is "no change requested", which
//! is not the same thing as "set to zero". Every field is therefore an
//! explicit option, never a bare primitive with a sentinel.

use serde::{Deserialize, Serialize};

use crate::fields::{PropertyValue, TelemetryField};

/// A sparse set of requested field changes.
///
/// Deserializes from any JSON object: keys that are present become
/// present fields, everything else stays absent. Unknown keys are
/// ignored. The flap detent count is simulator-owned and has no slot
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialUpdate {
    /// Requested throttle lever position, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttle: Option<f64>,
    /// Requested mixture lever position, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixture: Option<f64>,
    /// Requested elevator trim deflection, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevator_trim: Option<f64>,
    /// Requested flap setting, if any. Deliberately not range-checked
    /// against the reported detent count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flaps_index: Option<i64>,
}

impl PartialUpdate {
    /// An update that requests no changes at all.
    pub const EMPTY: Self = Self {
        throttle: None,
        mixture: None,
        elevator_trim: None,
        flaps_index: None,
    };

    /// Whether every field is absent.
    pub const fn is_empty(&self) -> bool {
        self.throttle.is_none()
            && self.mixture.is_none()
            && self.elevator_trim.is_none()
            && self.flaps_index.is_none()
    }

    /// Iterate over the present fields as typed channel values.
    pub fn entries(&self) -> impl Iterator<Item = (TelemetryField, PropertyValue)> {
        [
            self.throttle
                .map(|v| (TelemetryField::Throttle, PropertyValue::Real(v))),
            self.mixture
                .map(|v| (TelemetryField::Mixture, PropertyValue::Real(v))),
            self.elevator_trim
                .map(|v| (TelemetryField::ElevatorTrim, PropertyValue::Real(v))),
            self.flaps_index
                .map(|v| (TelemetryField::FlapsIndex, PropertyValue::Integer(v))),
        ]
        .into_iter()
        .flatten()
    }
}
