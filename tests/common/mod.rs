//! Shared test utilities for isthisup integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use isthisup::availability::{AvailabilityChecker, AvailabilityConfig, RetryPolicy};
use isthisup::certificate::TlsCertificateValidator;
use isthisup::connectivity::{ConnectivityProbe, ProbeError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Probe with a fixed answer.
pub struct FixedProbe {
    online: bool,
    calls: AtomicU32,
}

impl FixedProbe {
    pub fn online() -> Arc<Self> {
        Arc::new(Self {
            online: true,
            calls: AtomicU32::new(0),
        })
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Self {
            online: false,
            calls: AtomicU32::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityProbe for FixedProbe {
    async fn is_online(&self) -> Result<bool, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.online)
    }
}

/// Checker with a short retry delay, suitable for plain HTTP mock targets.
pub fn fast_checker(max_attempts: u32) -> AvailabilityChecker {
    let config = AvailabilityConfig {
        request_timeout: Duration::from_secs(2),
        retry: RetryPolicy {
            max_attempts,
            delay: Duration::from_millis(10),
        },
        min_certificate_validity: Duration::from_secs(24 * 60 * 60),
    };
    let validator = Arc::new(TlsCertificateValidator::new(Duration::from_secs(2)).unwrap());
    AvailabilityChecker::new(config, validator).unwrap()
}

/// Shared HTTP client for notifiers.
pub fn client() -> Arc<reqwest::Client> {
    Arc::new(reqwest::Client::new())
}
