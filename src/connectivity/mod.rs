//! Connectivity probe: is this machine online at all?
//!
//! The monitor only trusts a failed target check when the host itself can
//! reach the internet. The probe sends a handful of ICMP echo requests to a
//! well-known host and reports online as soon as one reply comes back.

mod config;
mod error;

pub use config::*;
pub use error::*;

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use surge_ping::{Client, Config, PingIdentifier, PingSequence, ICMP};

/// Decides whether the host has internet access.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// `Ok(true)` when the outside world answered.
    async fn is_online(&self) -> Result<bool, ProbeError>;
}

/// ICMP echo probe over a privileged raw socket.
pub struct IcmpProbe {
    client: Client,
    config: ConnectivityConfig,
}

impl IcmpProbe {
    /// Open the raw ICMP socket.
    ///
    /// Must be called inside a tokio runtime. Fails when the process lacks
    /// `CAP_NET_RAW` (or root), which callers treat as fatal.
    pub fn new(config: ConnectivityConfig) -> Result<Self, ProbeError> {
        let socket_config = Config::builder()
            .kind(ICMP::V4)
            .sock_type_hint(socket2::Type::RAW)
            .build();
        let client = Client::new(&socket_config).map_err(ProbeError::Socket)?;

        Ok(Self { client, config })
    }

    async fn resolve(&self) -> Option<IpAddr> {
        match tokio::net::lookup_host((self.config.host.as_str(), 0)).await {
            Ok(addrs) => {
                let addrs: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
                let found = first_ipv4(&addrs);
                if found.is_none() && !addrs.is_empty() {
                    tracing::warn!(
                        host = %self.config.host,
                        addresses = addrs.len(),
                        "Probe host has no IPv4 address, ICMP probe is IPv4 only"
                    );
                }
                found
            }
            Err(e) => {
                tracing::warn!(host = %self.config.host, error = %e, "Probe host did not resolve");
                None
            }
        }
    }
}

fn first_ipv4(addrs: &[IpAddr]) -> Option<IpAddr> {
    addrs.iter().copied().find(IpAddr::is_ipv4)
}

#[async_trait]
impl ConnectivityProbe for IcmpProbe {
    async fn is_online(&self) -> Result<bool, ProbeError> {
        tracing::debug!(host = %self.config.host, "Testing internet connection");

        let Some(addr) = self.resolve().await else {
            return Ok(false);
        };

        let mut pinger = self
            .client
            .pinger(addr, PingIdentifier(rand::random()))
            .await;
        pinger.timeout(Duration::from_secs(self.config.timeout_seconds));

        let payload = [0u8; 56];
        let mut received = 0u16;
        for seq in 0..self.config.count {
            match pinger.ping(PingSequence(seq), &payload).await {
                Ok((_, rtt)) => {
                    received += 1;
                    tracing::trace!(%addr, seq, rtt_ms = rtt.as_millis() as u64, "Echo reply");
                }
                Err(e) => {
                    tracing::trace!(%addr, seq, error = %e, "Echo lost");
                }
            }
        }

        tracing::debug!(
            host = %self.config.host,
            sent = self.config.count,
            received,
            "Connectivity probe finished"
        );

        Ok(received > 0)
    }
}
