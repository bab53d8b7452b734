//! OpsGenie Alerts API v2 notifier.

use super::{deliver, AlertEvent, Notifier, NotifierError};
use crate::config::Platform;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

/// Alerts API v2 endpoint (EU instance)
pub const OPSGENIE_ALERTS_URL: &str = "https://api.eu.opsgenie.com/v2/alerts";

/// Opens OpsGenie alerts with a `GenieKey` API key.
pub struct OpsGenieNotifier {
    api_key: String,
    endpoint: String,
    client: Arc<Client>,
}

impl OpsGenieNotifier {
    pub fn new(api_key: String, client: Arc<Client>) -> Self {
        Self {
            api_key,
            endpoint: OPSGENIE_ALERTS_URL.to_string(),
            client,
        }
    }

    /// Override the alerts endpoint (for testing).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct OpsGenieAlert<'a> {
    message: &'a str,
    priority: &'static str,
    alias: &'a str,
}

#[async_trait]
impl Notifier for OpsGenieNotifier {
    fn platform(&self) -> Platform {
        Platform::OpsGenie
    }

    async fn notify(&self, event: &AlertEvent) -> Result<(), NotifierError> {
        let body = OpsGenieAlert {
            message: &event.summary,
            priority: "P1",
            alias: &event.dedup_key,
        };

        let request = self
            .client
            .post(&self.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("GenieKey {}", self.api_key),
            )
            .json(&body);
        deliver(self.platform(), request).await
    }
}
