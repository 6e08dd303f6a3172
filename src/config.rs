//! Scan configuration with up-front validation.

use std::time::Duration;

use crate::error::InputError;

/// Settings shared by every probe of a scan invocation.
///
/// Built once through [`ScanConfig::new`], which rejects values the scan
/// engine cannot honor; read-only afterwards.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    timeout: Duration,
    max_concurrency: usize,
    rate_delay: Duration,
}

impl ScanConfig {
    /// Validate and build a configuration from raw second-denominated input.
    pub fn new(
        timeout_secs: f64,
        max_concurrency: usize,
        rate_delay_secs: f64,
    ) -> Result<Self, InputError> {
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(InputError::NonPositiveTimeout(timeout_secs));
        }
        if max_concurrency == 0 {
            return Err(InputError::ZeroConcurrency);
        }
        if !rate_delay_secs.is_finite() || rate_delay_secs < 0.0 {
            return Err(InputError::NegativeRateDelay(rate_delay_secs));
        }

        Ok(Self {
            timeout: Duration::from_secs_f64(timeout_secs),
            max_concurrency,
            rate_delay: Duration::from_secs_f64(rate_delay_secs),
        })
    }

    /// Per-probe connect timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Worker pool size.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Per-worker pacing delay, `None` when unthrottled.
    ///
    /// Each worker sleeps this long after every probe, so aggregate
    /// throughput for a host is about `max_concurrency / rate_delay`
    /// probes per second, not `1 / rate_delay`.
    pub fn rate_delay(&self) -> Option<Duration> {
        if self.rate_delay.is_zero() {
            None
        } else {
            Some(self.rate_delay)
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            max_concurrency: 100,
            rate_delay: Duration::ZERO,
        }
    }
}
