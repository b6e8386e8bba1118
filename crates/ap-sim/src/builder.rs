//! Fluent builder for constructing a [`Sim`].

use ap_core::{AirportConfig, RunId, RunRng};
use ap_queue::{ResourcePool, Scheduler};

use crate::{ArrivalGenerator, ServiceTimes, Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                                   |
/// |---------------|-------------------------------------------|
/// | `.run_id(r)`  | `RunId(0)`                                |
/// | `.seed(s)`    | `config.base_seed + run_id`               |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(AirportConfig::default())
///     .run_id(RunId(3))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// let summary = sim.summary();
/// ```
pub struct SimBuilder {
    config: AirportConfig,
    run:    RunId,
    seed:   Option<u64>,
}

impl SimBuilder {
    pub fn new(config: AirportConfig) -> Self {
        Self {
            config,
            run:  RunId(0),
            seed: None,
        }
    }

    /// Index of this run within its experiment.  Also selects the default
    /// seed.
    pub fn run_id(mut self, run: RunId) -> Self {
        self.run = run;
        self
    }

    /// Override the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration, create fresh pools and samplers, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let seed = self
            .seed
            .unwrap_or_else(|| RunRng::seed_for_run(self.config.base_seed, self.run));

        let checkers = ResourcePool::new(self.config.num_checkers as usize)?;
        let scanners = (0..self.config.num_scanners)
            .map(|_| ResourcePool::new(1))
            .collect::<Result<Vec<_>, _>>()?;

        let arrivals = ArrivalGenerator::new(self.config.arrival_rate)?;
        let service = ServiceTimes::from_config(&self.config)?;

        Ok(Sim {
            run: self.run,
            rng: RunRng::new(seed),
            scheduler: Scheduler::new(),
            checkers,
            scanners,
            arrivals,
            service,
            records: Vec::new(),
            started: false,
            config: self.config,
        })
    }
}
