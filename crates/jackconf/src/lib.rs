//! Minimal configuration loading for jackwatch.
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins, key by key):
//! 1. `/etc/jackwatch/config.toml` (system)
//! 2. `~/.config/jackwatch/config.toml` (user)
//! 3. `./jackwatch.toml` (local override, replaced by `--config` when given)
//! 4. Environment variables (`JACKWATCH_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [enumeration]
//! max_devices = 10
//!
//! [events]
//! command = "acpi_listen"
//! args = []
//!
//! [output]
//! format = "text"
//!
//! [telemetry]
//! log_level = "warn"
//! ```

pub mod loader;
pub mod settings;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use settings::{EnumerationConfig, EventsConfig, OutputConfig, OutputFormat, TelemetryConfig};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Complete jackwatch configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JackConfig {
    pub enumeration: EnumerationConfig,
    pub events: EventsConfig,
    pub output: OutputConfig,
    pub telemetry: TelemetryConfig,
}

impl JackConfig {
    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = JackConfig::default();

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                });
            }
        }

        for path in loader::discover_config_files_with_override(config_path) {
            loader::load_into(&mut config, &path)?;
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Serialize config to a TOML string.
    pub fn to_toml(&self) -> String {
        // Built by hand so an unbounded capacity shows up as a comment
        let mut output = String::new();

        output.push_str("# jackwatch configuration\n\n");

        output.push_str("[enumeration]\n");
        match self.enumeration.max_devices {
            Some(max) => output.push_str(&format!("max_devices = {}\n", max)),
            None => output.push_str("# max_devices = unbounded\n"),
        }

        output.push_str("\n[events]\n");
        output.push_str(&format!("command = {}\n", toml_string(&self.events.command)));
        let args: Vec<String> = self.events.args.iter().map(|a| toml_string(a)).collect();
        output.push_str(&format!("args = [{}]\n", args.join(", ")));

        output.push_str("\n[output]\n");
        output.push_str(&format!("format = \"{}\"\n", self.output.format));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!(
            "log_level = {}\n",
            toml_string(&self.telemetry.log_level)
        ));

        output
    }
}

fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}
