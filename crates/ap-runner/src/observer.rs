//! Experiment observer trait for reporting and output.

use ap_sim::{PassengerRecord, RunSummary};

use crate::ExperimentResult;

/// Callbacks invoked by [`Experiment::run_with`][crate::Experiment::run_with].
///
/// Calls are always sequential and in run order, even when the runs
/// themselves executed in parallel.
pub trait ExperimentObserver {
    /// A run finished.  `records` holds every passenger of that run,
    /// including those still in flight at the horizon.
    fn on_run_complete(&mut self, _summary: &RunSummary, _records: &[PassengerRecord]) {}

    /// All runs finished and the aggregate is final.
    fn on_experiment_end(&mut self, _result: &ExperimentResult) {}
}

/// An [`ExperimentObserver`] that does nothing.
pub struct NoopExperimentObserver;

impl ExperimentObserver for NoopExperimentObserver {}
