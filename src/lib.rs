//! isthisup - single-target availability watchdog
//!
//! Periodically checks that one website answers (and, for HTTPS, holds a
//! certificate that is not about to expire) and raises a deduplicated
//! incident on PagerDuty or OpsGenie when it does not.

pub mod alert;
pub mod availability;
pub mod certificate;
pub mod cli;
pub mod config;
pub mod connectivity;
pub mod logging;
pub mod monitor;
pub mod target;
