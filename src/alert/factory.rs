//! Notifier factory: picks the backend once, at startup.

use super::{opsgenie::OpsGenieNotifier, pagerduty::PagerDutyNotifier, Notifier};
use crate::config::Platform;
use reqwest::Client;
use std::sync::Arc;

/// Create the notifier for a platform.
///
/// # Examples
///
/// ```
/// use isthisup::alert::factory::create_notifier;
/// use isthisup::config::Platform;
/// use reqwest::Client;
/// use std::sync::Arc;
///
/// let notifier = create_notifier(Platform::OpsGenie, "key".to_string(), Arc::new(Client::new()));
/// assert_eq!(notifier.platform(), Platform::OpsGenie);
/// ```
pub fn create_notifier(
    platform: Platform,
    api_key: String,
    client: Arc<Client>,
) -> Arc<dyn Notifier> {
    match platform {
        Platform::PagerDuty => Arc::new(PagerDutyNotifier::new(api_key, client)),
        Platform::OpsGenie => Arc::new(OpsGenieNotifier::new(api_key, client)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_backend() {
        let client = Arc::new(Client::new());
        for platform in [Platform::PagerDuty, Platform::OpsGenie] {
            let notifier = create_notifier(platform, "key".to_string(), client.clone());
            assert_eq!(notifier.platform(), platform);
        }
    }
}
