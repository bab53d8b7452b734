//! Availability checking: the retry state machine.
//!
//! One check runs up to `max_attempts` attempts. Each attempt validates the
//! certificate first (HTTPS targets only), then issues a GET. The first
//! successful attempt ends the check; a failure of either kind sleeps the
//! fixed retry delay and tries again until the budget is spent.

mod config;
mod error;
mod state;


pub use config::*;
pub use error::*;
pub use state::*;

use crate::certificate::CertificateValidator;
use crate::target::Target;
use std::sync::Arc;

/// Runs availability checks against a target.
pub struct AvailabilityChecker {
    /// HTTP client for the GET probe
    client: reqwest::Client,
    /// Certificate validation for HTTPS targets
    certificates: Arc<dyn CertificateValidator>,
    config: AvailabilityConfig,
}

impl AvailabilityChecker {
    /// Create a checker with its own HTTP client.
    pub fn new(
        config: AvailabilityConfig,
        certificates: Arc<dyn CertificateValidator>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self::with_client(config, certificates, client))
    }

    /// Create a checker around an existing HTTP client.
    pub fn with_client(
        config: AvailabilityConfig,
        certificates: Arc<dyn CertificateValidator>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            certificates,
            config,
        }
    }

    pub fn config(&self) -> &AvailabilityConfig {
        &self.config
    }

    /// Check the target until it answers or the retry budget is spent.
    pub async fn check(&self, target: &Target) -> CheckVerdict {
        let mut retry = RetryState::new(&self.config.retry);

        loop {
            let error = match self.attempt(target).await {
                Ok(()) => return CheckVerdict::up(retry.attempt() + 1),
                Err(error) => error,
            };

            let decision = retry.record_failure();
            match &error {
                AttemptError::Certificate(e) => tracing::warn!(
                    url = %target,
                    attempt = retry.attempt(),
                    max_attempts = retry.max_attempts(),
                    error = %e,
                    "SSL check failed"
                ),
                AttemptError::Http(e) => tracing::warn!(
                    url = %target,
                    attempt = retry.attempt(),
                    max_attempts = retry.max_attempts(),
                    error = %e,
                    "Check failed"
                ),
            }

            match decision {
                RetryDecision::RetryAfter(delay) => tokio::time::sleep(delay).await,
                RetryDecision::Exhausted => {
                    return CheckVerdict::down(retry.attempt(), error.to_string());
                }
            }
        }
    }

    /// One attempt: certificate (if HTTPS), then GET.
    async fn attempt(&self, target: &Target) -> Result<(), AttemptError> {
        if target.is_https() {
            self.certificates
                .validate(
                    target.host(),
                    target.port(),
                    self.config.min_certificate_validity,
                )
                .await?;
        }

        self.probe_http(target).await?;
        Ok(())
    }

    async fn probe_http(&self, target: &Target) -> Result<(), HttpCheckError> {
        let response = self
            .client
            .get(target.url().clone())
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| Self::classify_error(e, self.config.request_timeout.as_secs()))?;

        let status = response.status().as_u16();
        tracing::debug!(url = %target, status, "Target responded");

        if status >= 400 {
            return Err(HttpCheckError::Status(status));
        }

        Ok(())
    }

    /// Classify reqwest error into HttpCheckError.
    fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> HttpCheckError {
        if e.is_timeout() {
            HttpCheckError::Timeout(timeout_seconds)
        } else {
            HttpCheckError::ConnectionFailed(e.to_string())
        }
    }
}
