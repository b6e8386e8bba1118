//! `ap-output` — experiment output writers for the checkpoint simulator.
//!
//! | Backend | Files created                                              |
//! |---------|------------------------------------------------------------|
//! | CSV     | `passengers.csv`, `run_summaries.csv`, `experiment.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`ExperimentOutputObserver`], which implements
//! `ap_runner::ExperimentObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ap_output::{CsvWriter, ExperimentOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ExperimentOutputObserver::new(writer, config.wait_threshold);
//! experiment.run_with(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ExperimentOutputObserver;
pub use row::{ExperimentRow, PassengerRow, RunSummaryRow};
pub use writer::OutputWriter;
