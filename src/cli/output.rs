//! Output formatting helpers for CLI commands

use crate::availability::CheckVerdict;
use crate::target::Target;
use colored::Colorize;
use serde_json::json;

/// Human-readable verdict line
pub fn format_verdict_text(target: &Target, verdict: &CheckVerdict) -> String {
    let status = if verdict.is_up() {
        "UP".green().bold().to_string()
    } else {
        "DOWN".red().bold().to_string()
    };

    let attempts = match verdict.attempts {
        1 => "1 attempt".to_string(),
        n => format!("{} attempts", n),
    };

    if verdict.is_up() {
        format!("{} {} ({})", status, target, attempts)
    } else {
        format!(
            "{} {} ({}): {}",
            status,
            target,
            attempts,
            verdict.reason.dimmed()
        )
    }
}

/// Verdict as JSON
pub fn format_verdict_json(target: &Target, verdict: &CheckVerdict) -> String {
    serde_json::to_string_pretty(&json!({
        "url": target.as_str(),
        "alias": target.host_alias(),
        "up": verdict.up,
        "attempts": verdict.attempts,
        "reason": verdict.reason,
    }))
    .unwrap_or_default()
}
