//! The authoritative telemetry mirror.
//!
//! [`StateStore`] owns the one in-process copy of the simulator's
//! control-surface state. Both mutation paths -- the link's notification
//! pump and the HTTP update path -- and every read go through its single
//! mutex, so no observer ever sees a torn multi-field update.

use std::sync::{Arc, Mutex, MutexGuard};

use simbridge_types::{PartialUpdate, PropertyValue, TelemetryField, TelemetryState};
use tracing::debug;

use crate::link::{PropertySink, SimulatorLink};

/// Concurrency-safe owner of the mirrored [`TelemetryState`].
///
/// Constructed once and shared by `Arc` with the notification path and
/// the protocol server; there is no ambient global instance. Client
/// updates are merged under the lock and forwarded to the simulator
/// link only after the lock is released, so a slow link write can never
/// stall readers or the notification pump.
pub struct StateStore {
    mirror: Mutex<TelemetryState>,
    link: Arc<dyn SimulatorLink>,
}

impl StateStore {
    /// Create a zero-valued mirror that forwards writes to `link`.
    pub fn new(link: Arc<dyn SimulatorLink>) -> Self {
        Self {
            mirror: Mutex::new(TelemetryState::default()),
            link,
        }
    }

    /// The link this store forwards writes to.
    pub fn link(&self) -> &Arc<dyn SimulatorLink> {
        &self.link
    }

    /// Acquire the mirror lock, recovering from poisoning.
    ///
    /// The mirror is plain data; a panicking holder cannot leave it in
    /// a torn state worth rejecting, so a poisoned lock still serves
    /// the last committed values.
    fn lock(&self) -> MutexGuard<'_, TelemetryState> {
        match self.mirror.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Return a copy of the current state.
    ///
    /// Never exposes a partially-applied update: the copy is taken
    /// under the same lock every mutation holds.
    pub fn snapshot(&self) -> TelemetryState {
        *self.lock()
    }

    /// Overwrite one field from the simulator notification path.
    ///
    /// Fields arrive independently and in no guaranteed order; each
    /// call is its own atomic overwrite.
    pub fn refresh_field(&self, field: TelemetryField, value: PropertyValue) {
        self.lock().set_field(field, value);
    }

    /// Merge a client update into the mirror and forward the writes.
    ///
    /// All present fields are committed in one critical section, so
    /// concurrent calls to [`snapshot`](Self::snapshot) and
    /// [`refresh_field`](Self::refresh_field) see either none or all of
    /// them. The simulator writes are issued after the lock is dropped,
    /// using the values already committed. Absent fields are untouched;
    /// an empty update degenerates to a plain snapshot.
    pub fn apply_update(&self, update: &PartialUpdate) -> TelemetryState {
        let committed = {
            let mut mirror = self.lock();
            for (field, value) in update.entries() {
                mirror.set_field(field, value);
            }
            *mirror
        };

        for (field, value) in update.entries() {
            self.link.write_property(field, value);
        }

        debug!(
            fields = update.entries().count(),
            "applied client update"
        );
        committed
    }
}

impl PropertySink for StateStore {
    fn on_property(&self, field: TelemetryField, value: PropertyValue) {
        self.refresh_field(field, value);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp, clippy::unwrap_used)]

    use std::thread;

    use super::*;
    use crate::link::RecordingLink;

    fn store_with_link() -> (Arc<StateStore>, Arc<RecordingLink>) {
        let link = Arc::new(RecordingLink::new());
        let store = Arc::new(StateStore::new(Arc::clone(&link) as Arc<dyn SimulatorLink>));
        (store, link)
    }

    #[test]
    fn partial_update_touches_only_named_fields() {
        let (store, link) = store_with_link();
        link.connect();

        store.refresh_field(TelemetryField::Mixture, PropertyValue::Real(0.3));
        store.refresh_field(TelemetryField::FlapsPositions, PropertyValue::Integer(3));
        store.refresh_field(TelemetryField::FlapsIndex, PropertyValue::Integer(1));

        let after = store.apply_update(&PartialUpdate {
            throttle: Some(0.5),
            ..PartialUpdate::EMPTY
        });

        assert_eq!(after.throttle, 0.5);
        assert_eq!(after.mixture, 0.3);
        assert_eq!(after.elevator_trim, 0.0);
        assert_eq!(after.flaps_positions, 3);
        assert_eq!(after.flaps_index, 1);
    }

    #[test]
    fn empty_update_is_a_noop() {
        let (store, _link) = store_with_link();
        store.refresh_field(TelemetryField::Throttle, PropertyValue::Real(0.9));

        let before = store.snapshot();
        let after = store.apply_update(&PartialUpdate::EMPTY);
        assert_eq!(before, after);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn committed_writes_are_forwarded_to_the_link() {
        let (store, link) = store_with_link();
        link.connect();

        store.apply_update(&PartialUpdate {
            throttle: Some(0.25),
            flaps_index: Some(2),
            ..PartialUpdate::EMPTY
        });

        assert_eq!(
            link.writes(),
            vec![
                (TelemetryField::Throttle, PropertyValue::Real(0.25)),
                (TelemetryField::FlapsIndex, PropertyValue::Integer(2)),
            ]
        );
    }

    #[test]
    fn disconnected_update_commits_locally_without_side_channel() {
        let (store, link) = store_with_link();
        assert!(!link.is_connected());

        let after = store.apply_update(&PartialUpdate {
            elevator_trim: Some(0.1),
            ..PartialUpdate::EMPTY
        });

        assert_eq!(after.elevator_trim, 0.1);
        assert!(link.writes().is_empty());
    }

    #[test]
    fn concurrent_disjoint_updates_all_land() {
        let (store, link) = store_with_link();
        link.connect();

        let updates = [
            PartialUpdate {
                throttle: Some(0.1),
                ..PartialUpdate::EMPTY
            },
            PartialUpdate {
                mixture: Some(0.2),
                ..PartialUpdate::EMPTY
            },
            PartialUpdate {
                elevator_trim: Some(0.3),
                ..PartialUpdate::EMPTY
            },
            PartialUpdate {
                flaps_index: Some(4),
                ..PartialUpdate::EMPTY
            },
        ];

        let handles: Vec<_> = updates
            .into_iter()
            .map(|update| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.apply_update(&update);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.throttle, 0.1);
        assert_eq!(snapshot.mixture, 0.2);
        assert_eq!(snapshot.elevator_trim, 0.3);
        assert_eq!(snapshot.flaps_index, 4);
        assert_eq!(link.writes().len(), 4);
    }

    #[test]
    fn link_accessor_exposes_connection_state() {
        let (store, link) = store_with_link();
        assert!(!store.link().is_connected());
        link.connect();
        assert!(store.link().is_connected());
    }

    #[test]
    fn sink_delivery_lands_in_the_mirror() {
        let (store, _link) = store_with_link();
        let sink: &dyn PropertySink = store.as_ref();
        sink.on_property(TelemetryField::Throttle, PropertyValue::Real(0.42));
        assert_eq!(store.snapshot().throttle, 0.42);
    }

    #[test]
    fn out_of_range_flaps_index_is_preserved() {
        // flaps_positions stays 0; the store does not clamp or reject.
        let (store, _link) = store_with_link();
        let after = store.apply_update(&PartialUpdate {
            flaps_index: Some(5),
            ..PartialUpdate::EMPTY
        });
        assert_eq!(after.flaps_positions, 0);
        assert_eq!(after.flaps_index, 5);
    }
}
