//! Alert dispatch to incident-management platforms.
//!
//! [`Notifier`] abstracts the platform; [`factory::create_notifier`] picks
//! PagerDuty or OpsGenie once at startup. Every alert is a single POST with
//! no retry, and the dedup key derived from the target host lets the platform
//! coalesce repeated incidents.

use async_trait::async_trait;

pub mod error;
pub mod event;
pub mod factory;
pub mod opsgenie;
pub mod pagerduty;

pub use error::NotifierError;
pub use event::AlertEvent;
pub use factory::create_notifier;
pub use opsgenie::OpsGenieNotifier;
pub use pagerduty::PagerDutyNotifier;

use crate::config::Platform;
use crate::target::Target;

/// Delivers a down alert to one incident platform.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Platform this notifier talks to.
    fn platform(&self) -> Platform;

    /// Post one alert. A transport failure or a status above 400 is an error.
    async fn notify(&self, event: &AlertEvent) -> Result<(), NotifierError>;
}

/// Raise the "target is down" alert for `target`.
pub async fn dispatch(notifier: &dyn Notifier, target: &Target) -> Result<(), NotifierError> {
    let event = AlertEvent::target_down(target);

    tracing::info!(
        platform = %notifier.platform(),
        url = %target,
        dedup_key = %event.dedup_key,
        "Sending alert"
    );

    notifier.notify(&event).await
}

/// Send a prepared request and apply the delivery policy.
///
/// Only statuses strictly above 400 are failures; a plain 400 is accepted.
async fn deliver(
    platform: Platform,
    request: reqwest::RequestBuilder,
) -> Result<(), NotifierError> {
    let response = request.send().await.map_err(|e| NotifierError::Request {
        platform,
        message: e.to_string(),
    })?;

    let status = response.status().as_u16();
    if status > 400 {
        return Err(NotifierError::Rejected { platform, status });
    }

    tracing::debug!(%platform, status, "Alert accepted");
    Ok(())
}
