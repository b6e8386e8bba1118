//! Experiment configuration.
//!
//! `AirportConfig` is a plain input record.  The application crate fills it
//! from whatever source it likes (CLI flags in `demos/checkpoint`) and hands it
//! to the simulation builder or experiment runner, both of which call
//! [`AirportConfig::validate`] before any run starts.

use crate::{ConfigError, ConfigResult};

/// Parameters for one experiment: staffing, demand, service times, horizon.
///
/// All times are in the same abstract clock unit (minutes by convention).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirportConfig {
    /// Independent runs per experiment.
    pub num_runs: u32,

    /// Servers in the single boarding-pass check pool.
    pub num_checkers: u32,

    /// Number of independent single-lane personal scanners.
    pub num_scanners: u32,

    /// Passenger arrival rate (passengers per clock unit).
    pub arrival_rate: f64,

    /// Mean of the exponential boarding-pass check time.
    pub boarding_pass_mean: f64,

    /// Lower bound of the uniform personal-scan time.
    pub min_scan: f64,

    /// Upper bound of the uniform personal-scan time.
    pub max_scan: f64,

    /// Length of each run.  No events at or after this time are processed.
    pub sim_time: f64,

    /// A run "succeeds" when its mean wait is at most this value.
    pub wait_threshold: f64,

    /// Seed of run 0; run `i` uses `base_seed + i`.
    pub base_seed: u64,
}

impl Default for AirportConfig {
    /// Six-hour runs at 50 passengers/minute with 35 checkers and 35 scanners.
    fn default() -> Self {
        Self {
            num_runs:           25,
            num_checkers:       35,
            num_scanners:       35,
            arrival_rate:       50.0,
            boarding_pass_mean: 0.75,
            min_scan:           0.5,
            max_scan:           1.0,
            sim_time:           360.0,
            wait_threshold:     15.0,
            base_seed:          0,
        }
    }
}

impl AirportConfig {
    /// Check every parameter against its constraint.
    ///
    /// Returns the first violation found, in field declaration order.
    pub fn validate(&self) -> ConfigResult<()> {
        require_count("num_runs", self.num_runs)?;
        require_count("num_checkers", self.num_checkers)?;
        require_count("num_scanners", self.num_scanners)?;
        require_positive("arrival_rate", self.arrival_rate)?;
        require_positive("boarding_pass_mean", self.boarding_pass_mean)?;

        check_scan_bounds(self.min_scan, self.max_scan)?;
        require_positive("sim_time", self.sim_time)?;
        require_finite("wait_threshold", self.wait_threshold)?;
        Ok(())
    }

    /// Offered load on the check stage: arrival rate × mean service time ÷
    /// servers.  Values ≥ 1 mean the check queue grows without bound.
    pub fn checker_utilisation(&self) -> f64 {
        self.arrival_rate * self.boarding_pass_mean / f64::from(self.num_checkers)
    }

    /// Offered load on the scan stage, assuming perfectly balanced lanes.
    pub fn scanner_utilisation(&self) -> f64 {
        let mean_scan = 0.5 * (self.min_scan + self.max_scan);
        self.arrival_rate * mean_scan / f64::from(self.num_scanners)
    }
}

/// Check that `[min, max]` is a usable uniform scan-time range.
///
/// Besides `0 <= min <= max`, the span scaled by the sampler's
/// `1 / (1 - ε)` factor must stay finite, or `Uniform` cannot be built.
pub fn check_scan_bounds(min: f64, max: f64) -> ConfigResult<()> {
    require_finite("min_scan", min)?;
    require_finite("max_scan", max)?;
    if min < 0.0 {
        return Err(ConfigError::NegativeScan { min });
    }
    if min > max {
        return Err(ConfigError::ScanRange { min, max });
    }
    if !((max - min) / (1.0 - f64::EPSILON)).is_finite() {
        return Err(ConfigError::ScanSpan { min, max });
    }
    Ok(())
}

fn require_count(field: &'static str, value: u32) -> ConfigResult<()> {
    if value == 0 {
        return Err(ConfigError::ZeroCount { field });
    }
    Ok(())
}

fn require_finite(field: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> ConfigResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}
