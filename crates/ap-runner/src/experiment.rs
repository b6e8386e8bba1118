//! The `Experiment` runner.

use ap_core::{AirportConfig, RunId};
use ap_sim::{NoopObserver, RunOutcome, SimBuilder, SimResult};
use tracing::{debug, info};

use crate::{ExperimentObserver, ExperimentResult, NoopExperimentObserver, ResultAccumulator};

/// Runs `config.num_runs` independent simulations of one staffing level.
///
/// Run `i` is seeded with `config.base_seed + i`, so with the default base
/// seed the runs use seeds `0..num_runs`.
pub struct Experiment {
    config: AirportConfig,
}

impl Experiment {
    /// Validate `config` up front so no run starts with bad parameters.
    pub fn new(config: AirportConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AirportConfig {
        &self.config
    }

    /// Run every simulation and aggregate, without callbacks.
    pub fn run(&self) -> SimResult<ExperimentResult> {
        self.run_with(&mut NoopExperimentObserver)
    }

    /// Execute a single run to its horizon.
    pub fn run_one(&self, run: RunId) -> SimResult<RunOutcome> {
        let mut sim = SimBuilder::new(self.config.clone()).run_id(run).build()?;
        sim.run(&mut NoopObserver)?;
        Ok(sim.into_outcome())
    }

    /// Run every simulation, reporting each finished run to `observer` in
    /// run order, and return the aggregate.
    ///
    /// With the `parallel` Cargo feature the runs execute on Rayon's thread
    /// pool; the observer still sees them sequentially, in order.
    pub fn run_with<O: ExperimentObserver>(&self, observer: &mut O) -> SimResult<ExperimentResult> {
        info!(
            runs = self.config.num_runs,
            checkers = self.config.num_checkers,
            scanners = self.config.num_scanners,
            "experiment started"
        );

        let mut acc = ResultAccumulator::new(self.config.wait_threshold);

        #[cfg(not(feature = "parallel"))]
        {
            for run in 0..self.config.num_runs {
                let outcome = self.run_one(RunId(run))?;
                self.report(outcome, observer, &mut acc);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let outcomes: Vec<SimResult<RunOutcome>> = (0..self.config.num_runs)
                .into_par_iter()
                .map(|run| self.run_one(RunId(run)))
                .collect();
            for outcome in outcomes {
                self.report(outcome?, observer, &mut acc);
            }
        }

        let result = acc.finish();
        observer.on_experiment_end(&result);

        info!(
            successes = result.successes(),
            success_rate = result.success_rate,
            grand_mean = ?result.grand_mean,
            "experiment finished"
        );
        Ok(result)
    }

    fn report<O: ExperimentObserver>(
        &self,
        outcome:  RunOutcome,
        observer: &mut O,
        acc:      &mut ResultAccumulator,
    ) {
        let RunOutcome { summary, records } = outcome;
        debug!(
            run = summary.run.0,
            completed = summary.completed,
            mean_wait = ?summary.mean_wait,
            "run complete"
        );
        observer.on_run_complete(&summary, &records);
        acc.record(summary);
    }
}
