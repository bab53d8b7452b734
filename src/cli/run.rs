//! Run command implementation

use crate::alert::create_notifier;
use crate::availability::{AvailabilityChecker, AvailabilityConfig};
use crate::certificate::TlsCertificateValidator;
use crate::cli::RunArgs;
use crate::config::{ConfigError, LoggingConfig, WatchdogConfig};
use crate::connectivity::IcmpProbe;
use crate::logging::init_tracing;
use crate::monitor::Monitor;
use std::path::Path;
use std::sync::Arc;

/// Load configuration from the environment, or from a file overlaid by it.
pub fn load_config(path: Option<&Path>) -> Result<WatchdogConfig, ConfigError> {
    match path {
        Some(p) => WatchdogConfig::load(p)?.with_env_overrides(),
        None => WatchdogConfig::from_env(),
    }
}

/// Logging settings usable even when the rest of the configuration is not.
fn fallback_logging(args: &RunArgs) -> LoggingConfig {
    let mut logging = LoggingConfig::default();
    logging.apply_lookup(&|key: &str| std::env::var(key).ok());
    if let Some(ref level) = args.log_level {
        logging.level = level.clone();
    }
    logging
}

/// Wire the probe, validator, checker and notifier together.
///
/// Opens the ICMP socket, so this fails without raw socket privileges.
pub fn build_monitor(config: &WatchdogConfig) -> Result<Monitor, Box<dyn std::error::Error>> {
    let target = config.target()?;

    let probe = Arc::new(IcmpProbe::new(config.connectivity.clone())?);
    let validator = Arc::new(TlsCertificateValidator::new(config.request_timeout())?);
    let checker = AvailabilityChecker::new(AvailabilityConfig::from(config), validator)?;

    let alert_client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()?;
    let notifier = create_notifier(config.platform, config.api_key.clone(), Arc::new(alert_client));

    Ok(Monitor::new(
        target,
        probe,
        checker,
        notifier,
        config.sleep_interval(),
    ))
}

/// Main run command handler. Returns only on a fatal condition.
pub async fn run_watchdog(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration
    let loaded = load_config(args.config.as_deref()).map(|mut config| {
        if let Some(ref level) = args.log_level {
            config.logging.level = level.clone();
        }
        config
    });

    // 2. Initialize tracing
    let logging = match &loaded {
        Ok(config) => config.logging.clone(),
        Err(_) => fallback_logging(&args),
    };
    init_tracing(&logging)?;

    let config = loaded.inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;

    tracing::info!("Starting isthisup");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Build the monitor
    let monitor = build_monitor(&config)
        .inspect_err(|e| tracing::error!(error = %e, "Cannot start monitor"))?;

    // 4. Watch until something fatal happens
    let err = match monitor.run().await {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    tracing::error!(error = %err, "Quitting");
    Err(err.into())
}
