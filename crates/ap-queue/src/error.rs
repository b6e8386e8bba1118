use ap_core::SimTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueueError {
    #[error("resource pool capacity must be at least 1")]
    ZeroCapacity,

    #[error("release called on a pool with no slot in use")]
    ReleaseIdle,

    #[error("event delay must be finite and non-negative, got {0}")]
    InvalidDelay(f64),

    #[error("cannot schedule event at {at}: clock is already at {now}")]
    EventInPast { at: SimTime, now: SimTime },
}

pub type QueueResult<T> = Result<T, QueueError>;
