//! Experiment-level aggregation.

use ap_sim::RunSummary;

/// Aggregate outcome of an experiment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentResult {
    /// One summary per run, in run order.
    pub runs:         Vec<RunSummary>,
    /// Mean-wait target a run must meet to count as a success.
    pub threshold:    f64,
    /// Successful runs ÷ total runs, in `[0, 1]`.
    pub success_rate: f64,
    /// Mean of the per-run mean waits.  Runs with no completed passenger have
    /// no mean and are skipped; `None` if every run was like that.
    pub grand_mean:   Option<f64>,
}

impl ExperimentResult {
    /// Number of runs that met the threshold.
    pub fn successes(&self) -> usize {
        self.runs.iter().filter(|r| r.meets(self.threshold)).count()
    }
}

/// Collects run summaries as they finish and computes the aggregate once the
/// last one is in.
///
/// Summaries may arrive in any order; [`finish`][Self::finish] sorts them by
/// run index.
#[derive(Clone, Debug)]
pub struct ResultAccumulator {
    threshold: f64,
    runs:      Vec<RunSummary>,
}

impl ResultAccumulator {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            runs: Vec::new(),
        }
    }

    pub fn record(&mut self, summary: RunSummary) {
        self.runs.push(summary);
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn finish(mut self) -> ExperimentResult {
        self.runs.sort_by_key(|r| r.run);

        let total = self.runs.len();
        let successes = self.runs.iter().filter(|r| r.meets(self.threshold)).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            successes as f64 / total as f64
        };

        let means: Vec<f64> = self.runs.iter().filter_map(|r| r.mean_wait).collect();
        let grand_mean = (!means.is_empty()).then(|| means.iter().sum::<f64>() / means.len() as f64);

        ExperimentResult {
            runs: self.runs,
            threshold: self.threshold,
            success_rate,
            grand_mean,
        }
    }
}
