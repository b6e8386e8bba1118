//! Simulation observer trait for instrumentation and data collection.

use ap_core::{PassengerId, ScannerId, SimTime};

use crate::PassengerRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as passengers move
/// through the pipeline.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: check-stage occupancy
///
/// ```rust,ignore
/// struct Occupancy { in_check: usize, peak: usize }
///
/// impl SimObserver for Occupancy {
///     fn on_check_start(&mut self, _now: SimTime, _p: PassengerId) {
///         self.in_check += 1;
///         self.peak = self.peak.max(self.in_check);
///     }
///     fn on_check_end(&mut self, _now: SimTime, _p: PassengerId) {
///         self.in_check -= 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// A passenger entered the system and joined the checker queue.
    fn on_arrival(&mut self, _now: SimTime, _passenger: PassengerId) {}

    /// A checker slot was granted and service began.
    fn on_check_start(&mut self, _now: SimTime, _passenger: PassengerId) {}

    /// Check service finished and the checker slot was released.
    fn on_check_end(&mut self, _now: SimTime, _passenger: PassengerId) {}

    /// A scanner lane was granted and scanning began.
    fn on_scan_start(&mut self, _now: SimTime, _passenger: PassengerId, _scanner: ScannerId) {}

    /// Scanning finished; the passenger has left the system.
    fn on_scan_end(&mut self, _now: SimTime, _passenger: PassengerId, _scanner: ScannerId) {}

    /// Called once when the run reaches its horizon.
    fn on_run_end(&mut self, _now: SimTime, _records: &[PassengerRecord]) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
