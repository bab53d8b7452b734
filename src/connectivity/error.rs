//! Error types for the connectivity probe.

use thiserror::Error;

/// Errors that make the probe itself unusable.
///
/// Lost connectivity is not an error: it is reported as `Ok(false)`.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The privileged ICMP socket could not be opened
    #[error("cannot open ICMP socket (raw socket privileges required): {0}")]
    Socket(#[source] std::io::Error),
}
