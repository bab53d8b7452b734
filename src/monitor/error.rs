//! Fatal monitor conditions.

use crate::alert::NotifierError;
use crate::connectivity::ProbeError;
use thiserror::Error;

/// Conditions that stop the monitor. The driver logs them and exits.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// This machine has no internet access, so a failed check would be a
    /// false alarm
    #[error("cannot connect to internet")]
    Offline,

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Notifier(#[from] NotifierError),
}
