//! `ap-queue` — the discrete-event machinery underneath a checkpoint run.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`scheduler`]   | `Scheduler<E>`: virtual clock + `(time, seq)` min-heap  |
//! | [`pool`]        | `ResourcePool`, `Grant`: bounded servers, FIFO waiters  |
//! | [`routing`]     | `shortest_queue`: first-minimum lane selection          |
//! | [`error`]       | `QueueError`, `QueueResult<T>`                          |
//!
//! Nothing here knows about passengers' stages or service distributions;
//! `ap-sim` drives these types from its event handlers.

pub mod error;
pub mod pool;
pub mod routing;
pub mod scheduler;


pub use error::{QueueError, QueueResult};
pub use pool::{Grant, ResourcePool};
pub use routing::shortest_queue;
pub use scheduler::Scheduler;
