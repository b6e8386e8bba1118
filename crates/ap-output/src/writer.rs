//! The `OutputWriter` trait implemented by backend writers.

use crate::{ExperimentRow, OutputResult, PassengerRow, RunSummaryRow};

/// Sink for experiment output.
///
/// Errors surface through [`ExperimentOutputObserver::take_error`] when the
/// writer is driven by the observer.
///
/// [`ExperimentOutputObserver::take_error`]: crate::ExperimentOutputObserver::take_error
pub trait OutputWriter {
    /// Write every passenger of one run.
    fn write_passengers(&mut self, rows: &[PassengerRow]) -> OutputResult<()>;

    /// Write one run summary row.
    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Write the experiment aggregate.
    fn write_experiment(&mut self, row: &ExperimentRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
