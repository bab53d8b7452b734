//! Incident platform selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Incident-management platform that receives down alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    PagerDuty,
    OpsGenie,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pagerduty" => Ok(Platform::PagerDuty),
            "opsgenie" => Ok(Platform::OpsGenie),
            _ => Err(format!(
                "invalid platform '{}', expected 'pagerduty' or 'opsgenie'",
                s
            )),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::PagerDuty => write!(f, "pagerduty"),
            Platform::OpsGenie => write!(f, "opsgenie"),
        }
    }
}
