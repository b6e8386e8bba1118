use ap_core::{ConfigError, PassengerId, ScannerId};
use ap_queue::QueueError;
use thiserror::Error;

use crate::Stage;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("event queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("{0} has no record in this run")]
    UnknownPassenger(PassengerId),

    #[error("{0} does not exist in this run")]
    UnknownScanner(ScannerId),

    #[error("{passenger} is in stage {stage:?} but received {event}")]
    UnexpectedStage {
        passenger: PassengerId,
        stage:     Stage,
        event:     &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;
