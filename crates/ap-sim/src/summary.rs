//! Per-run summary statistics.

use ap_core::RunId;

use crate::PassengerRecord;

/// Summary of one run, derived from its passenger records.
///
/// Only passengers that completed before the horizon contribute to the
/// means; in-flight passengers are counted in `incomplete` and nothing else.
/// Every mean is `None` when no passenger completed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub run:                 RunId,
    pub seed:                u64,
    pub arrivals:            usize,
    pub completed:           usize,
    pub incomplete:          usize,
    pub mean_wait:           Option<f64>,
    pub max_wait:            Option<f64>,
    pub mean_total_time:     Option<f64>,
    pub mean_boarding_check: Option<f64>,
    pub mean_scan:           Option<f64>,
}

impl RunSummary {
    pub fn from_records(run: RunId, seed: u64, records: &[PassengerRecord]) -> Self {
        let mut completed = 0usize;
        let mut wait_sum = 0.0;
        let mut total_sum = 0.0;
        let mut check_sum = 0.0;
        let mut scan_sum = 0.0;
        let mut max_wait: Option<f64> = None;

        for r in records {
            let (Some(total), Some(check), Some(scan)) =
                (r.total_time(), r.boarding_check_duration, r.scan_duration)
            else {
                continue;
            };
            let wait = total - check - scan;
            completed += 1;
            wait_sum += wait;
            total_sum += total;
            check_sum += check;
            scan_sum += scan;
            max_wait = Some(max_wait.map_or(wait, |m| m.max(wait)));
        }

        let mean = |sum: f64| (completed > 0).then(|| sum / completed as f64);

        Self {
            run,
            seed,
            arrivals: records.len(),
            completed,
            incomplete: records.len() - completed,
            mean_wait: mean(wait_sum),
            max_wait,
            mean_total_time: mean(total_sum),
            mean_boarding_check: mean(check_sum),
            mean_scan: mean(scan_sum),
        }
    }

    /// `true` if this run's mean wait is defined and at most `threshold`.
    pub fn meets(&self, threshold: f64) -> bool {
        matches!(self.mean_wait, Some(w) if w <= threshold)
    }
}

/// Everything a finished run hands back: its summary and the full records.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub records: Vec<PassengerRecord>,
}
