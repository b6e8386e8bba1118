//! `ap-runner` — repeat a checkpoint run with independent seeds and judge
//! the staffing level.
//!
//! ```text
//! for run in 0..num_runs:
//!   seed    = base_seed + run
//!   summary = Sim(seed).run().summary()          (parallel with `parallel`)
//! success_rate = |{ run : mean_wait ≤ wait_threshold }| / num_runs
//! grand_mean   = mean of the defined per-run mean waits
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Executes runs on Rayon's thread pool.                  |
//! | `serde`    | `Serialize`/`Deserialize` on `ExperimentResult`.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ap_core::AirportConfig;
//! use ap_runner::Experiment;
//!
//! let result = Experiment::new(AirportConfig::default())?.run()?;
//! println!("success rate: {:.1}%", result.success_rate * 100.0);
//! ```

pub mod experiment;
pub mod observer;
pub mod result;


pub use experiment::Experiment;
pub use observer::{ExperimentObserver, NoopExperimentObserver};
pub use result::{ExperimentResult, ResultAccumulator};
