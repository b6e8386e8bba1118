//! `ap-core` — foundational types for the airport checkpoint simulator.
//!
//! This crate is a dependency of every other `ap-*` crate.  It has no `ap-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PassengerId`, `ScannerId`, `RunId`                   |
//! | [`time`]        | `SimTime`                                             |
//! | [`rng`]         | `RunRng` (one independent stream per run)             |
//! | [`config`]      | `AirportConfig` and its validation                    |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AirportConfig, check_scan_bounds};
pub use error::{ConfigError, ConfigResult};
pub use ids::{PassengerId, RunId, ScannerId};
pub use rng::RunRng;
pub use time::SimTime;
