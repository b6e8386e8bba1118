//! `ResourcePool`: `capacity` identical servers with one FIFO wait queue.
//!
//! A pool never blocks anything itself.  [`ResourcePool::request`] either
//! grants a free slot or parks the requester at the back of the queue, and
//! [`ResourcePool::release`] hands a freed slot straight to the queue head.
//! The caller turns those outcomes into scheduler events.
//!
//! Invariants (checked in debug builds):
//! - `in_use <= capacity`;
//! - the queue is non-empty only while every slot is in use, so a waiter is
//!   never left queued beside a free slot and a granted requester is never
//!   in the queue.

use std::collections::VecDeque;

use ap_core::PassengerId;

use crate::{QueueError, QueueResult};

/// Outcome of [`ResourcePool::request`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grant {
    /// A slot was free and is now held by the requester.
    Granted,
    /// All slots are busy; the requester is waiting at `position` (0 = head).
    Queued { position: usize },
}

/// Bounded-capacity server pool with a strict FIFO wait queue.
#[derive(Clone, Debug)]
pub struct ResourcePool {
    capacity: usize,
    in_use: usize,
    queue: VecDeque<PassengerId>,
    /// Largest queue length ever observed.
    peak_queue: usize,
}

impl ResourcePool {
    /// Create a pool of `capacity` servers.
    pub fn new(capacity: usize) -> QueueResult<Self> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            in_use: 0,
            queue: VecDeque::new(),
            peak_queue: 0,
        })
    }

    /// Ask for a slot on behalf of `passenger`.
    pub fn request(&mut self, passenger: PassengerId) -> Grant {
        if self.in_use < self.capacity {
            debug_assert!(self.queue.is_empty(), "free slot with waiters queued");
            self.in_use += 1;
            return Grant::Granted;
        }
        self.queue.push_back(passenger);
        self.peak_queue = self.peak_queue.max(self.queue.len());
        Grant::Queued { position: self.queue.len() - 1 }
    }

    /// Free one slot.
    ///
    /// If anyone is waiting, the slot passes to the queue head in the same
    /// instant (`in_use` is unchanged) and that passenger's id is returned.
    pub fn release(&mut self) -> QueueResult<Option<PassengerId>> {
        if self.in_use == 0 {
            return Err(QueueError::ReleaseIdle);
        }
        match self.queue.pop_front() {
            Some(next) => Ok(Some(next)),
            None => {
                self.in_use -= 1;
                Ok(None)
            }
        }
    }

    /// Passengers waiting for a slot (not counting those being served).
    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots right now.
    #[inline]
    pub fn available(&self) -> usize {
        self.capacity - self.in_use
    }

    pub fn peak_queue_len(&self) -> usize {
        self.peak_queue
    }

    /// Waiters in grant order, head first.
    pub fn waiting(&self) -> impl Iterator<Item = PassengerId> + '_ {
        self.queue.iter().copied()
    }
}
