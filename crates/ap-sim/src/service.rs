//! Service-time and inter-arrival distributions.

use ap_core::{AirportConfig, ConfigError, ConfigResult, RunRng, check_scan_bounds};
use rand::distributions::Uniform;
use rand_distr::Exp;

/// Exponential inter-arrival gaps with rate `arrival_rate`.
pub(crate) fn arrival_gaps(arrival_rate: f64) -> ConfigResult<Exp<f64>> {
    Exp::new(arrival_rate).map_err(|e| ConfigError::Distribution(format!("arrival gap: {e}")))
}

/// Service-time samplers for the two stages.
///
/// - boarding check: exponential with mean `boarding_pass_mean`;
/// - personal scan: uniform on `[min_scan, max_scan]`.
#[derive(Clone, Debug)]
pub struct ServiceTimes {
    check: Exp<f64>,
    scan:  Uniform<f64>,
}

impl ServiceTimes {
    /// Build both samplers.  The scan range is checked again here so an
    /// unvalidated `config` returns an error instead of panicking in
    /// `Uniform::new_inclusive`.
    pub fn from_config(config: &AirportConfig) -> ConfigResult<Self> {
        let check = Exp::new(1.0 / config.boarding_pass_mean)
            .map_err(|e| ConfigError::Distribution(format!("boarding check: {e}")))?;
        check_scan_bounds(config.min_scan, config.max_scan)?;
        let scan = Uniform::new_inclusive(config.min_scan, config.max_scan);
        Ok(Self { check, scan })
    }

    #[inline]
    pub fn check_time(&self, rng: &mut RunRng) -> f64 {
        rng.sample(&self.check)
    }

    #[inline]
    pub fn scan_time(&self, rng: &mut RunRng) -> f64 {
        rng.sample(&self.scan)
    }
}
