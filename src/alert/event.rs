//! Platform-neutral alert description.

use crate::target::Target;

/// Source name reported to incident platforms.
pub const ALERT_SOURCE: &str = "isThisUp";

/// A "target is down" incident, before platform-specific encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEvent {
    /// `"<url> is not responding"`
    pub summary: String,
    /// Stable per target so repeated incidents coalesce
    pub dedup_key: String,
    pub source: &'static str,
}

impl AlertEvent {
    pub fn target_down(target: &Target) -> Self {
        Self {
            summary: format!("{} is not responding", target.as_str()),
            dedup_key: target.host_alias(),
            source: ALERT_SOURCE,
        }
    }
}
