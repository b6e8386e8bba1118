//! Plain data row types written by output backends.
//!
//! Times are raw simulation minutes.  `None` fields are written as empty
//! cells.

use ap_core::RunId;
use ap_runner::ExperimentResult;
use ap_sim::{PassengerRecord, RunSummary};

/// One passenger of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRow {
    pub run:            u32,
    pub passenger_id:   u32,
    pub arrival_time:   f64,
    pub check_start:    Option<f64>,
    pub boarding_check: Option<f64>,
    pub scanner:        Option<u32>,
    pub scan_start:     Option<f64>,
    pub scan_duration:  Option<f64>,
    pub exit_time:      Option<f64>,
    pub wait_time:      Option<f64>,
    /// `"done"` for completed passengers, otherwise the stage they were
    /// frozen in at the horizon.
    pub stage:          &'static str,
}

impl PassengerRow {
    pub fn from_record(run: RunId, r: &PassengerRecord) -> Self {
        Self {
            run:            run.0,
            passenger_id:   r.id.0,
            arrival_time:   r.arrival_time.as_f64(),
            check_start:    r.check_start.map(|t| t.as_f64()),
            boarding_check: r.boarding_check_duration,
            scanner:        r.scanner.map(|s| s.0),
            scan_start:     r.scan_start.map(|t| t.as_f64()),
            scan_duration:  r.scan_duration,
            exit_time:      r.exit_time.map(|t| t.as_f64()),
            wait_time:      r.wait_time(),
            stage:          r.stage.label(),
        }
    }
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummaryRow {
    pub run:                 u32,
    pub seed:                u64,
    pub arrivals:            u64,
    pub completed:           u64,
    pub incomplete:          u64,
    pub mean_wait:           Option<f64>,
    pub max_wait:            Option<f64>,
    pub mean_total_time:     Option<f64>,
    pub mean_boarding_check: Option<f64>,
    pub mean_scan:           Option<f64>,
    pub meets_threshold:     bool,
}

impl RunSummaryRow {
    pub fn from_summary(s: &RunSummary, threshold: f64) -> Self {
        Self {
            run:                 s.run.0,
            seed:                s.seed,
            arrivals:            s.arrivals as u64,
            completed:           s.completed as u64,
            incomplete:          s.incomplete as u64,
            mean_wait:           s.mean_wait,
            max_wait:            s.max_wait,
            mean_total_time:     s.mean_total_time,
            mean_boarding_check: s.mean_boarding_check,
            mean_scan:           s.mean_scan,
            meets_threshold:     s.meets(threshold),
        }
    }
}

/// The experiment aggregate, one row per experiment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentRow {
    pub runs:         u64,
    pub successes:    u64,
    pub threshold:    f64,
    pub success_rate: f64,
    pub grand_mean:   Option<f64>,
}

impl From<&ExperimentResult> for ExperimentRow {
    fn from(result: &ExperimentResult) -> Self {
        Self {
            runs:         result.runs.len() as u64,
            successes:    result.successes() as u64,
            threshold:    result.threshold,
            success_rate: result.success_rate,
            grand_mean:   result.grand_mean,
        }
    }
}
