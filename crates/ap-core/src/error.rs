//! Configuration error type.
//!
//! Every other `ap-*` crate wraps `ConfigError` as one variant of its own
//! error enum via `#[from]`, so a bad parameter surfaces the same way no
//! matter which layer validated it.

use thiserror::Error;

/// An input parameter violates its stated constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("min_scan must be non-negative, got {min}")]
    NegativeScan { min: f64 },

    #[error("min_scan ({min}) must not exceed max_scan ({max})")]
    ScanRange { min: f64, max: f64 },

    #[error("scan range [{min}, {max}] is too wide to sample")]
    ScanSpan { min: f64, max: f64 },

    #[error("cannot build distribution: {0}")]
    Distribution(String),
}

/// Shorthand result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
