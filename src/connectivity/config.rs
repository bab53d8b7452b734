//! Configuration for the connectivity probe.

use serde::{Deserialize, Serialize};

/// Where and how the host's own internet access is probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Stable external host that answers ICMP echo. Must resolve to an
    /// IPv4 address; a host with only AAAA records reads as offline.
    pub host: String,
    /// Echo requests sent per probe
    pub count: u16,
    /// Seconds to wait for each reply
    pub timeout_seconds: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            host: "www.google.com".to_string(),
            count: 3,
            timeout_seconds: 2,
        }
    }
}
