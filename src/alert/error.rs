//! Error types for alert delivery.

use crate::config::Platform;
use thiserror::Error;

/// Alert delivery failed. Never retried: the monitor stops, since a dead
/// notification channel leaves nobody to tell.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// The request could not be sent or no response arrived
    #[error("cannot alert with {platform}: {message}")]
    Request { platform: Platform, message: String },

    /// The platform answered with a status above 400
    #[error("cannot alert with {platform}: platform returned HTTP {status}")]
    Rejected { platform: Platform, status: u16 },
}
