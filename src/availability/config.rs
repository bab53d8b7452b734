//! Configuration for availability checking.

use crate::config::WatchdogConfig;
use std::time::Duration;

/// Bounded retry with a constant delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per check, at least 1
    pub max_attempts: u32,
    /// Pause after each failed attempt except the last
    pub delay: Duration,
}

/// Settings for one availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityConfig {
    /// Timeout for each HTTP request
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    /// Remaining certificate validity required for HTTPS targets
    pub min_certificate_validity: Duration,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy {
                max_attempts: 3,
                delay: Duration::from_secs(10),
            },
            min_certificate_validity: Duration::from_secs(14 * 24 * 60 * 60),
        }
    }
}

impl From<&WatchdogConfig> for AvailabilityConfig {
    fn from(config: &WatchdogConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            retry: RetryPolicy {
                max_attempts: config.retry,
                delay: config.retry_delay(),
            },
            min_certificate_validity: config.min_certificate_validity(),
        }
    }
}
