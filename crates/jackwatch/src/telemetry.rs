//! Log initialization.
//!
//! Logs go to stderr; stdout is reserved for device and jack reports.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `log_level` (any EnvFilter directive).
///
/// An unparseable directive falls back to `warn`.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|e| {
        eprintln!("jackwatch: ignoring log level {:?}: {}", log_level, e);
        EnvFilter::new("warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
