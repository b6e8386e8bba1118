//! Arrival generator: a lazy Poisson stream of new passengers.
//!
//! The generator itself never touches the scheduler.  On every `Arrival`
//! event the run asks it for the gap to the next arrival and for a fresh
//! record; the stream ends when the run horizon stops event processing.

use ap_core::{ConfigResult, PassengerId, RunRng, SimTime};
use rand_distr::Exp;

use crate::PassengerRecord;
use crate::service::arrival_gaps;

pub struct ArrivalGenerator {
    gaps:    Exp<f64>,
    spawned: u32,
}

impl ArrivalGenerator {
    /// Gaps are exponential with rate `arrival_rate` (mean `1 / arrival_rate`).
    pub fn new(arrival_rate: f64) -> ConfigResult<Self> {
        Ok(Self {
            gaps:    arrival_gaps(arrival_rate)?,
            spawned: 0,
        })
    }

    /// Draw the time until the next arrival.
    #[inline]
    pub fn next_gap(&self, rng: &mut RunRng) -> f64 {
        rng.sample(&self.gaps)
    }

    /// Create the record for a passenger arriving at `now`.
    ///
    /// IDs are handed out in arrival order starting at 0.
    pub fn spawn(&mut self, now: SimTime) -> PassengerRecord {
        let id = PassengerId(self.spawned);
        self.spawned += 1;
        PassengerRecord::new(id, now)
    }

    /// Passengers created so far.
    pub fn spawned(&self) -> u32 {
        self.spawned
    }
}
