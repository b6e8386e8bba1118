//! `Scheduler<E>`: virtual clock plus pending-event min-heap.
//!
//! # Ordering
//!
//! Events are keyed by `(time, seq)` where `seq` is a per-scheduler counter
//! incremented on every `schedule_*` call.  Events for the same instant pop
//! in the order they were scheduled, which gives the run its same-instant
//! guarantees:
//!
//! - a passenger releasing a server finishes its own follow-up action (the
//!   routing decision, the next request) before the waiter it unblocked
//!   resumes, because the waiter's resume event is scheduled *during* the
//!   release;
//! - arrivals are processed in generation order.
//!
//! # Clock
//!
//! `now` only moves forward.  It advances to an event's time when that event
//! is popped, and to the run horizon via [`Scheduler::advance_to`] once the
//! run stops.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ap_core::SimTime;

use crate::{QueueError, QueueResult};

/// One pending event.  Ordered so that `BinaryHeap` behaves as a min-heap.
struct Scheduled<E> {
    at: SimTime,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: earliest time, then lowest seq, is the heap maximum.
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual clock and pending-event queue for one run.
pub struct Scheduler<E> {
    now: SimTime,
    events: BinaryHeap<Scheduled<E>>,
    next_seq: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            now: SimTime::ZERO,
            events: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule `event` at absolute time `at`.
    ///
    /// `at` must be finite and not earlier than `now()`.
    pub fn schedule_at(&mut self, at: SimTime, event: E) -> QueueResult<()> {
        if !at.0.is_finite() {
            return Err(QueueError::InvalidDelay(at.0 - self.now.0));
        }
        if at < self.now {
            return Err(QueueError::EventInPast { at, now: self.now });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Scheduled { at, seq, event });
        Ok(())
    }

    /// Schedule `event` to fire `delay` clock units from now.
    ///
    /// A zero delay is valid: the event fires at the current instant, after
    /// every event already queued for this instant.
    pub fn schedule_in(&mut self, delay: f64, event: E) -> QueueResult<()> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(QueueError::InvalidDelay(delay));
        }
        self.schedule_at(self.now + delay, event)
    }

    /// Time of the earliest pending event, if any.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.events.peek().map(|s| s.at)
    }

    /// Pop the earliest event and advance the clock to its time.
    pub fn pop_next(&mut self) -> Option<(SimTime, E)> {
        let Scheduled { at, event, .. } = self.events.pop()?;
        self.now = at;
        Some((at, event))
    }

    /// Pop the earliest event only if it fires strictly before `horizon`.
    ///
    /// Returns `None` (and leaves the queue untouched) when the next event is
    /// at or after the horizon, or when no events remain.
    pub fn pop_before(&mut self, horizon: SimTime) -> Option<(SimTime, E)> {
        match self.peek_time() {
            Some(at) if at < horizon => self.pop_next(),
            _ => None,
        }
    }

    /// Move the clock forward to `t` without processing anything.
    ///
    /// Earlier times are ignored so the clock never runs backwards.
    pub fn advance_to(&mut self, t: SimTime) {
        if t > self.now {
            self.now = t;
        }
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
