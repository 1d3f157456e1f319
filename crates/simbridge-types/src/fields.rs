//! Property channel identifiers for the simulator link.
//!
//! Every value mirrored from the simulator travels over a registered
//! property channel. A [`TelemetryField`] names the channel and carries
//! everything the link needs to register it: a stable datum id, the
//! simulator-side variable name, the unit string, and the value
//! [`PropertyKind`].

use serde::{Deserialize, Serialize};

/// The value kind carried by a property channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    /// A 64-bit floating point value (lever fractions, trim radians).
    Real,
    /// A 64-bit signed integer value (flap detent counts and indices).
    Integer,
}

/// A typed property value delivered by or written to the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    /// A real-valued property.
    Real(f64),
    /// An integer-valued property.
    Integer(i64),
}

impl PropertyValue {
    /// The kind of this value.
    pub const fn kind(self) -> PropertyKind {
        match self {
            Self::Real(_) => PropertyKind::Real,
            Self::Integer(_) => PropertyKind::Integer,
        }
    }
}

/// A mirrored telemetry property channel.
///
/// The discrete flap count ([`FlapsPositions`](Self::FlapsPositions)) is
/// reported by the simulator but never written back; the other four
/// channels are read-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TelemetryField {
    /// Throttle lever position as a fraction of full travel.
    Throttle,
    /// Mixture lever position as a fraction of full travel.
    Mixture,
    /// Elevator trim deflection in radians.
    ElevatorTrim,
    /// Number of discrete flap settings the aircraft reports.
    FlapsPositions,
    /// Current discrete flap setting.
    FlapsIndex,
}

impl TelemetryField {
    /// Every property channel the bridge registers, in registration order.
    pub const ALL: [Self; 5] = [
        Self::Throttle,
        Self::Mixture,
        Self::ElevatorTrim,
        Self::FlapsPositions,
        Self::FlapsIndex,
    ];

    /// Stable numeric id used as the simulator-side data definition id.
    pub const fn datum_id(self) -> u32 {
        match self {
            Self::Throttle => 0x01,
            Self::Mixture => 0x02,
            Self::ElevatorTrim => 0x03,
            Self::FlapsPositions => 0x04,
            Self::FlapsIndex => 0x05,
        }
    }

    /// The simulator-side variable name for this channel.
    pub const fn external_name(self) -> &'static str {
        match self {
            Self::Throttle => "GENERAL ENG THROTTLE LEVER POSITION:1",
            Self::Mixture => "GENERAL ENG MIXTURE LEVER POSITION:1",
            Self::ElevatorTrim => "ELEVATOR TRIM POSITION",
            Self::FlapsPositions => "FLAPS NUM HANDLE POSITIONS",
            Self::FlapsIndex => "FLAPS HANDLE INDEX",
        }
    }

    /// The unit string used when registering this channel.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Throttle | Self::Mixture => "percent over 100",
            Self::ElevatorTrim => "radians",
            Self::FlapsPositions | Self::FlapsIndex => "number",
        }
    }

    /// The value kind this channel carries.
    pub const fn kind(self) -> PropertyKind {
        match self {
            Self::Throttle | Self::Mixture | Self::ElevatorTrim => PropertyKind::Real,
            Self::FlapsPositions | Self::FlapsIndex => PropertyKind::Integer,
        }
    }

    /// The kind-matched zero value for this channel.
    pub const fn zero(self) -> PropertyValue {
        match self.kind() {
            PropertyKind::Real => PropertyValue::Real(0.0),
            PropertyKind::Integer => PropertyValue::Integer(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datum_ids_are_unique() {
        let mut ids: Vec<u32> = TelemetryField::ALL.iter().map(|f| f.datum_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TelemetryField::ALL.len());
    }

    #[test]
    fn zero_matches_kind() {
        for field in TelemetryField::ALL {
            assert_eq!(field.zero().kind(), field.kind());
        }
    }

    #[test]
    fn lever_channels_are_real() {
        assert_eq!(TelemetryField::Throttle.kind(), PropertyKind::Real);
        assert_eq!(TelemetryField::FlapsIndex.kind(), PropertyKind::Integer);
    }
}
