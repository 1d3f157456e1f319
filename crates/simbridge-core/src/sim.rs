//! In-process simulated link for headless development and tests.
//!
//! [`SimulatedLink`] implements the full [`SimulatorLink`] contract
//! without a simulator SDK: registered real-valued channels drift with
//! small random steps on a pump task, writes feed back into the next
//! pump cycle, and an injected fault drops the session exactly the way
//! a transport error would.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::Rng;
use simbridge_types::{PropertyKind, PropertyValue, TelemetryField};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::link::{LinkHealth, PropertySink, SimulatorLink};

/// Flap detent count reported by the simulated aircraft on connect.
const SIMULATED_FLAP_DETENTS: i64 = 4;

/// Largest per-cycle random step applied to real-valued channels.
const DRIFT_STEP: f64 = 0.005;

/// A loopback simulator link.
///
/// The pump task delivers every changed registered property to the
/// sink at a fixed cadence while connected. Dropping the link aborts
/// the pump, so the background task never outlives its owner.
pub struct SimulatedLink {
    health: LinkHealth,
    update_interval: Duration,
    properties: Mutex<BTreeMap<TelemetryField, PropertyValue>>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl SimulatedLink {
    /// Create a disconnected link that pumps at `update_interval`.
    pub const fn new(update_interval: Duration) -> Self {
        Self {
            health: LinkHealth::new(),
            update_interval,
            properties: Mutex::new(BTreeMap::new()),
            pump: Mutex::new(None),
        }
    }

    fn locked_properties(&self) -> MutexGuard<'_, BTreeMap<TelemetryField, PropertyValue>> {
        match self.properties.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// The current value of a registered channel, if any.
    pub fn property(&self, field: TelemetryField) -> Option<PropertyValue> {
        self.locked_properties().get(&field).copied()
    }

    /// Simulate a transport error on the session.
    ///
    /// The link drops to disconnected and stays there until
    /// [`connect`](SimulatorLink::connect) is called again; the pump
    /// keeps running but delivers nothing while disconnected.
    pub fn inject_fault(&self) {
        self.health.mark_disconnected();
        info!("simulated transport fault, link disconnected");
    }

    /// Start the notification pump, delivering changes to `sink`.
    ///
    /// Replaces any previously running pump. The task holds only a weak
    /// handle to the link, so dropping the link ends the pump.
    pub fn start_pump(self: &Arc<Self>, sink: Arc<dyn PropertySink>) {
        let weak = Arc::downgrade(self);
        let interval = self.update_interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut last_sent: BTreeMap<TelemetryField, PropertyValue> = BTreeMap::new();
            loop {
                ticker.tick().await;
                let Some(link) = weak.upgrade() else { break };
                if !link.health.is_connected() {
                    continue;
                }

                let current: Vec<(TelemetryField, PropertyValue)> = {
                    let mut properties = link.locked_properties();
                    for value in properties.values_mut() {
                        *value = drift(*value);
                    }
                    properties.iter().map(|(f, v)| (*f, *v)).collect()
                };

                // Deliver outside the property lock; only changed values
                // count as notifications.
                for (field, value) in current {
                    if last_sent.get(&field) != Some(&value) {
                        sink.on_property(field, value);
                        last_sent.insert(field, value);
                    }
                }
            }
        });

        let previous = {
            let mut pump = match self.pump.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            pump.replace(handle)
        };
        if let Some(previous) = previous {
            previous.abort();
        }
        let interval_ms = u64::try_from(self.update_interval.as_millis()).unwrap_or(u64::MAX);
        debug!(interval_ms, "simulated pump started");
    }
}

/// Apply one pump cycle's movement to a property value.
///
/// Real channels take a small random step, clamped to the lever/trim
/// travel envelope. Integer channels only move when written.
fn drift(value: PropertyValue) -> PropertyValue {
    match value {
        PropertyValue::Real(v) => {
            let step = rand::rng().random_range(-DRIFT_STEP..=DRIFT_STEP);
            PropertyValue::Real((v + step).clamp(-1.0, 1.0))
        }
        PropertyValue::Integer(_) => value,
    }
}

impl SimulatorLink for SimulatedLink {
    fn connect(&self) -> bool {
        if self.health.is_connected() {
            return true;
        }
        self.health.mark_connected();
        // The simulated aircraft reports its flap detent count as part
        // of the handshake, like the real SDK does on first data.
        let mut properties = self.locked_properties();
        if properties.contains_key(&TelemetryField::FlapsPositions) {
            properties.insert(
                TelemetryField::FlapsPositions,
                PropertyValue::Integer(SIMULATED_FLAP_DETENTS),
            );
        }
        info!("simulated link connected");
        true
    }

    fn is_connected(&self) -> bool {
        self.health.is_connected()
    }

    fn register_property(&self, field: TelemetryField) {
        let kind = field.kind();
        self.locked_properties().insert(field, field.zero());
        debug!(?field, ?kind, name = field.external_name(), "property registered");
    }

    fn write_property(&self, field: TelemetryField, value: PropertyValue) {
        if !self.health.is_connected() {
            return;
        }
        let mut properties = self.locked_properties();
        if properties.contains_key(&field) {
            properties.insert(field, value);
        }
    }
}

impl Drop for SimulatedLink {
    fn drop(&mut self) {
        // Release the pump on every exit path, not at finalizer whim.
        let slot = match self.pump.get_mut() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}
