//! `ExperimentOutputObserver<W>`: bridges `ExperimentObserver` to an
//! `OutputWriter`.

use ap_runner::{ExperimentObserver, ExperimentResult};
use ap_sim::{PassengerRecord, RunSummary};

use crate::row::{ExperimentRow, PassengerRow, RunSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`ExperimentObserver`] that writes every run's passengers and summary,
/// then the aggregate, to any [`OutputWriter`].
///
/// `ExperimentObserver` methods have no return value, so writer errors are
/// stored.  After `run_with` returns, check with
/// [`take_error`][Self::take_error].
pub struct ExperimentOutputObserver<W: OutputWriter> {
    writer:     W,
    threshold:  f64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ExperimentOutputObserver<W> {
    /// `threshold` marks each run row as meeting the target or not.
    pub fn new(writer: W, threshold: f64) -> Self {
        Self {
            writer,
            threshold,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> ExperimentObserver for ExperimentOutputObserver<W> {
    fn on_run_complete(&mut self, summary: &RunSummary, records: &[PassengerRecord]) {
        let rows: Vec<PassengerRow> = records
            .iter()
            .map(|r| PassengerRow::from_record(summary.run, r))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_passengers(&rows);
            self.store_err(result);
        }

        let row = RunSummaryRow::from_summary(summary, self.threshold);
        let result = self.writer.write_run_summary(&row);
        self.store_err(result);
    }

    fn on_experiment_end(&mut self, result: &ExperimentResult) {
        let write = self.writer.write_experiment(&ExperimentRow::from(result));
        self.store_err(write);
        let finish = self.writer.finish();
        self.store_err(finish);
    }
}
