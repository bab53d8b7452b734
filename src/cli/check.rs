//! Check command implementation

use crate::cli::output::{format_verdict_json, format_verdict_text};
use crate::cli::run::{build_monitor, load_config};
use crate::cli::CheckArgs;
use crate::logging::init_tracing;

/// Handle `isthisup check`: one probe and check, no alert.
///
/// A down target is reported as an error so the process exits non-zero.
pub async fn handle_check(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    init_tracing(&config.logging)?;

    let monitor = build_monitor(&config)?;
    let verdict = monitor.check_once().await?;

    let output = if args.json {
        format_verdict_json(monitor.target(), &verdict)
    } else {
        format_verdict_text(monitor.target(), &verdict)
    };
    println!("{}", output);

    if verdict.is_up() {
        Ok(())
    } else {
        Err(format!("{} is down", monitor.target()).into())
    }
}
