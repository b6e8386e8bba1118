//! `ap-sim` — one run of the two-stage airport security checkpoint.
//!
//! # Pipeline
//!
//! ```text
//! Arrival ─▶ checker pool (capacity = num_checkers, FIFO)
//!         ─▶ shortest-queue routing over num_scanners single-lane pools
//!         ─▶ scanner lane (capacity 1, FIFO) ─▶ exit
//! ```
//!
//! Each passenger is an explicit state machine ([`Stage`]) resumed by
//! [`SimEvent`]s popped from an `ap_queue::Scheduler`.  Only one event is
//! handled at a time; passengers interleave but never run in parallel.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ap_core::AirportConfig;
//! use ap_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(AirportConfig::default()).seed(0).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("mean wait: {:?}", sim.summary().mean_wait);
//! ```

pub mod arrivals;
pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod record;
pub mod service;
pub mod sim;
pub mod summary;

#[cfg(test)]
mod tests;

pub use arrivals::ArrivalGenerator;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::SimEvent;
pub use observer::{NoopObserver, SimObserver};
pub use record::{PassengerRecord, PassengerStatus, Stage};
pub use service::ServiceTimes;
pub use sim::Sim;
pub use summary::{RunOutcome, RunSummary};
