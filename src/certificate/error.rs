//! Error types for certificate validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a certificate check failed. Recoverable: the availability checker
/// counts it as a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    /// TCP connect or TLS handshake did not complete
    #[error("connection/handshake error: {0}")]
    Handshake(String),

    /// The presented certificate is not valid for the requested host
    #[error("hostname mismatch: {0}")]
    HostnameMismatch(String),

    /// The leaf certificate expires inside the validity horizon
    #[error("certificate expires too soon: valid until {not_after}, required until {required_until}")]
    ExpiresTooSoon {
        not_after: DateTime<Utc>,
        required_until: DateTime<Utc>,
    },

    /// The server sent no certificate or one that could not be parsed
    #[error("unreadable certificate: {0}")]
    Unreadable(String),
}
