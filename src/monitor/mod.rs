//! The monitor loop.
//!
//! Each cycle runs strictly in order: connectivity probe, availability
//! check, verdict log, alert on a down verdict, then the configured sleep.
//! Fatal conditions are returned to the driver instead of exiting here.

mod error;


pub use error::MonitorError;

use crate::alert::{self, Notifier};
use crate::availability::{AvailabilityChecker, CheckVerdict};
use crate::connectivity::ConnectivityProbe;
use crate::target::Target;
use std::sync::Arc;
use std::time::Duration;

/// Watches a single target forever.
pub struct Monitor {
    target: Target,
    probe: Arc<dyn ConnectivityProbe>,
    checker: AvailabilityChecker,
    notifier: Arc<dyn Notifier>,
    /// Pause between the end of one cycle and the start of the next
    interval: Duration,
}

impl Monitor {
    pub fn new(
        target: Target,
        probe: Arc<dyn ConnectivityProbe>,
        checker: AvailabilityChecker,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
    ) -> Self {
        Self {
            target,
            probe,
            checker,
            notifier,
            interval,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Probe connectivity, then check the target. Never alerts.
    pub async fn check_once(&self) -> Result<CheckVerdict, MonitorError> {
        if !self.probe.is_online().await? {
            return Err(MonitorError::Offline);
        }

        let verdict = self.checker.check(&self.target).await;

        if verdict.is_up() {
            tracing::info!(url = %self.target, attempts = verdict.attempts, "Target is up");
        } else {
            tracing::warn!(
                url = %self.target,
                attempts = verdict.attempts,
                reason = %verdict.reason,
                "Target is down"
            );
        }

        Ok(verdict)
    }

    /// One full cycle: [`check_once`](Self::check_once), plus exactly one
    /// alert when the target is down.
    pub async fn run_cycle(&self) -> Result<CheckVerdict, MonitorError> {
        let verdict = self.check_once().await?;

        if !verdict.is_up() {
            alert::dispatch(self.notifier.as_ref(), &self.target).await?;
        }

        Ok(verdict)
    }

    /// Run cycles until a fatal condition occurs.
    pub async fn run(&self) -> Result<(), MonitorError> {
        tracing::info!(
            url = %self.target,
            platform = %self.notifier.platform(),
            interval_seconds = self.interval.as_secs(),
            max_attempts = self.checker.config().retry.max_attempts,
            "Monitor started"
        );

        loop {
            self.run_cycle().await?;
            tokio::time::sleep(self.interval).await;
        }
    }
}
