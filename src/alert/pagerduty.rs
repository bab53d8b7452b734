//! PagerDuty Events API v2 notifier.

use super::{deliver, AlertEvent, Notifier, NotifierError};
use crate::config::Platform;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

/// Events API v2 enqueue endpoint
pub const PAGERDUTY_EVENTS_URL: &str = "https://events.pagerduty.com/v2/enqueue";

/// Triggers PagerDuty incidents through a routing key.
pub struct PagerDutyNotifier {
    routing_key: String,
    endpoint: String,
    client: Arc<Client>,
}

impl PagerDutyNotifier {
    pub fn new(routing_key: String, client: Arc<Client>) -> Self {
        Self {
            routing_key,
            endpoint: PAGERDUTY_EVENTS_URL.to_string(),
            client,
        }
    }

    /// Override the events endpoint (for testing).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Events API v2 trigger body
#[derive(Debug, Serialize)]
struct PagerDutyEvent<'a> {
    routing_key: &'a str,
    event_action: &'static str,
    dedup_key: &'a str,
    payload: PagerDutyPayload<'a>,
}

#[derive(Debug, Serialize)]
struct PagerDutyPayload<'a> {
    summary: &'a str,
    source: &'a str,
    severity: &'static str,
}

#[async_trait]
impl Notifier for PagerDutyNotifier {
    fn platform(&self) -> Platform {
        Platform::PagerDuty
    }

    async fn notify(&self, event: &AlertEvent) -> Result<(), NotifierError> {
        let body = PagerDutyEvent {
            routing_key: &self.routing_key,
            event_action: "trigger",
            dedup_key: &event.dedup_key,
            payload: PagerDutyPayload {
                summary: &event.summary,
                source: event.source,
                severity: "critical",
            },
        };

        let request = self.client.post(&self.endpoint).json(&body);
        deliver(self.platform(), request).await
    }
}
