//! The simulator link capability boundary.
//!
//! The bridge core never talks to an SDK directly. It consumes the
//! narrow [`SimulatorLink`] trait and delivers asynchronous change
//! notifications through [`PropertySink`], so the same core runs against
//! a real SDK binding, the in-process [`SimulatedLink`], or a test stub.
//! No notification path depends on a UI event loop.
//!
//! [`SimulatedLink`]: crate::sim::SimulatedLink

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use simbridge_types::{PropertyValue, TelemetryField};

/// Lock a mutex, recovering the data from a poisoned guard.
fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// The link's connection state.
///
/// Transitions are one-way in each direction: a successful handshake
/// moves to [`Connected`](Self::Connected), and any transport error
/// observed while pumping simulator messages moves back to
/// [`Disconnected`](Self::Disconnected). There is no automatic retry;
/// reconnection happens only when an external caller invokes
/// [`SimulatorLink::connect`] again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No live session with the simulator.
    Disconnected,
    /// Handshake completed; notifications and writes flow.
    Connected,
}

/// Receiver for asynchronous per-property change notifications.
///
/// The link invokes this on its own task whenever a registered property
/// changes. Implementations must be safe to call from any thread.
pub trait PropertySink: Send + Sync {
    /// Deliver one changed property value.
    fn on_property(&self, field: TelemetryField, value: PropertyValue);
}

/// The capability interface to the simulator's live data/command channel.
///
/// Implemented by the out-of-scope SDK binding and by the in-process
/// stubs in this crate. Errors never cross this boundary: `connect`
/// reports failure as `false`, and `write_property` while disconnected
/// is a silent no-op.
pub trait SimulatorLink: Send + Sync {
    /// Establish a session with the simulator.
    ///
    /// Idempotent when already connected. Returns whether the link is
    /// connected afterwards.
    fn connect(&self) -> bool;

    /// Whether the link currently has a live session.
    fn is_connected(&self) -> bool;

    /// Establish a one-way notification channel for one property.
    ///
    /// The field carries its own external name, unit, and value kind.
    fn register_property(&self, field: TelemetryField);

    /// Issue a command toward the simulator.
    ///
    /// Must not block and must not fail loudly; when disconnected this
    /// is a no-op.
    fn write_property(&self, field: TelemetryField, value: PropertyValue);
}

/// Shared Connected/Disconnected flag for link implementations.
///
/// Lock-free so the notification pump and the write path can consult it
/// without contending with each other.
#[derive(Debug)]
pub struct LinkHealth {
    connected: AtomicBool,
}

impl LinkHealth {
    /// Create a new health flag in the disconnected state.
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
        }
    }

    /// The current connection state.
    pub fn state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Whether the link is connected.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Record a successful handshake.
    pub fn mark_connected(&self) {
        self.connected.store(true, Ordering::Release);
    }

    /// Record a transport error; subsequent writes become no-ops.
    pub fn mark_disconnected(&self) {
        self.connected.store(false, Ordering::Release);
    }
}

impl Default for LinkHealth {
    fn default() -> Self {
        Self::new()
    }
}

/// A stub link that records every call made against it.
///
/// Used by the store and server tests to observe exactly which writes
/// the core forwards, and to exercise the disconnected-write contract
/// without a simulator.
#[derive(Debug, Default)]
pub struct RecordingLink {
    health: LinkHealth,
    refuse_connect: AtomicBool,
    registered: Mutex<Vec<TelemetryField>>,
    writes: Mutex<Vec<(TelemetryField, PropertyValue)>>,
}

impl RecordingLink {
    /// Create a disconnected recording link that accepts connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent [`connect`](SimulatorLink::connect) calls fail.
    pub fn refuse_connections(&self) {
        self.refuse_connect.store(true, Ordering::Release);
    }

    /// Drop the session, as a transport error would.
    pub fn drop_session(&self) {
        self.health.mark_disconnected();
    }

    /// The fields registered so far, in call order.
    pub fn registered(&self) -> Vec<TelemetryField> {
        lock_or_recover(&self.registered).clone()
    }

    /// The writes accepted so far, in call order.
    pub fn writes(&self) -> Vec<(TelemetryField, PropertyValue)> {
        lock_or_recover(&self.writes).clone()
    }
}

impl SimulatorLink for RecordingLink {
    fn connect(&self) -> bool {
        if self.refuse_connect.load(Ordering::Acquire) {
            return false;
        }
        self.health.mark_connected();
        true
    }

    fn is_connected(&self) -> bool {
        self.health.is_connected()
    }

    fn register_property(&self, field: TelemetryField) {
        lock_or_recover(&self.registered).push(field);
    }

    fn write_property(&self, field: TelemetryField, value: PropertyValue) {
        if !self.is_connected() {
            // Disconnected writes are dropped, not errors.
            return;
        }
        lock_or_recover(&self.writes).push((field, value));
    }
}
