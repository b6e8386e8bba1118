//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `passengers.csv`
//! - `run_summaries.csv`
//! - `experiment.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ExperimentRow, OutputResult, PassengerRow, RunSummaryRow};

pub const PASSENGER_HEADERS: [&str; 11] = [
    "run",
    "passenger_id",
    "arrival_time",
    "check_start",
    "boarding_check",
    "scanner",
    "scan_start",
    "scan_duration",
    "exit_time",
    "wait_time",
    "stage",
];

pub const RUN_SUMMARY_HEADERS: [&str; 11] = [
    "run",
    "seed",
    "arrivals",
    "completed",
    "incomplete",
    "mean_wait",
    "max_wait",
    "mean_total_time",
    "mean_boarding_check",
    "mean_scan",
    "meets_threshold",
];

pub const EXPERIMENT_HEADERS: [&str; 5] =
    ["runs", "successes", "threshold", "success_rate", "grand_mean"];

/// Writes experiment output to three CSV files.
pub struct CsvWriter {
    passengers: Writer<File>,
    summaries:  Writer<File>,
    experiment: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut passengers = Writer::from_path(dir.join("passengers.csv"))?;
        passengers.write_record(PASSENGER_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("run_summaries.csv"))?;
        summaries.write_record(RUN_SUMMARY_HEADERS)?;

        let mut experiment = Writer::from_path(dir.join("experiment.csv"))?;
        experiment.write_record(EXPERIMENT_HEADERS)?;

        Ok(Self {
            passengers,
            summaries,
            experiment,
            finished: false,
        })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map_or_else(String::new, |v| v.to_string())
}

impl OutputWriter for CsvWriter {
    fn write_passengers(&mut self, rows: &[PassengerRow]) -> OutputResult<()> {
        for row in rows {
            self.passengers.write_record(&[
                row.run.to_string(),
                row.passenger_id.to_string(),
                row.arrival_time.to_string(),
                opt(row.check_start),
                opt(row.boarding_check),
                opt(row.scanner),
                opt(row.scan_start),
                opt(row.scan_duration),
                opt(row.exit_time),
                opt(row.wait_time),
                row.stage.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.run.to_string(),
            row.seed.to_string(),
            row.arrivals.to_string(),
            row.completed.to_string(),
            row.incomplete.to_string(),
            opt(row.mean_wait),
            opt(row.max_wait),
            opt(row.mean_total_time),
            opt(row.mean_boarding_check),
            opt(row.mean_scan),
            (row.meets_threshold as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_experiment(&mut self, row: &ExperimentRow) -> OutputResult<()> {
        self.experiment.write_record(&[
            row.runs.to_string(),
            row.successes.to_string(),
            row.threshold.to_string(),
            row.success_rate.to_string(),
            opt(row.grand_mean),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.passengers.flush()?;
        self.summaries.flush()?;
        self.experiment.flush()?;
        Ok(())
    }
}
