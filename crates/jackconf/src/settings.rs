//! Configuration sections.

use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// Device enumeration limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationConfig {
    /// Maximum number of device records to keep.
    /// Default: unbounded
    pub max_devices: Option<usize>,
}

/// External jack event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsConfig {
    /// Program producing line-oriented ACPI events.
    /// Default: acpi_listen
    pub command: String,

    /// Extra arguments passed to `command`.
    pub args: Vec<String>,
}

impl EventsConfig {
    pub const STDIN: &'static str = "-";

    fn default_command() -> String {
        "acpi_listen".to_string()
    }

    /// True when events should be read from standard input instead of a child process.
    pub fn reads_stdin(&self) -> bool {
        self.command == Self::STDIN
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            command: Self::default_command(),
            args: Vec::new(),
        }
    }
}

/// Console output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Log-style lines, compatible with existing consumers.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid {
                key: "output.format".to_string(),
                message: format!("unknown format '{}', expected text or json", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Log filter (trace, debug, info, warn, error, or an EnvFilter directive).
    /// Default: warn, so stdout consumers only see device and jack lines.
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
