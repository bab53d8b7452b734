//! Error types for availability checking.

use crate::certificate::CertificateError;
use thiserror::Error;

/// HTTP-level reasons a target counts as down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpCheckError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Response status 400 or above
    #[error("HTTP error: {0}")]
    Status(u16),
}

/// Why a single attempt failed. Both kinds are retried the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("SSL check failed: {0}")]
    Certificate(#[from] CertificateError),

    #[error("check failed: {0}")]
    Http(#[from] HttpCheckError),
}
