//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, JackConfig, OutputFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided and exists, it replaces the local override.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/jackwatch/config.toml");
    if system.exists() {
        files.push(system);
    }

    // XDG_CONFIG_HOME or ~/.config
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("jackwatch/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("jackwatch.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read a TOML file and overlay every key it sets onto `config`.
pub fn load_into(config: &mut JackConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    apply_toml(config, &contents, path)
}

/// One config file as written: every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    enumeration: EnumerationFile,
    events: EventsFile,
    output: OutputFile,
    telemetry: TelemetryFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnumerationFile {
    max_devices: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EventsFile {
    command: Option<String>,
    args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputFile {
    format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TelemetryFile {
    log_level: Option<String>,
}

/// Overlay a TOML document onto `config`. Keys absent from the document keep
/// their current value, so files loaded later only override what they name.
pub(crate) fn apply_toml(
    config: &mut JackConfig,
    contents: &str,
    path: &Path,
) -> Result<(), ConfigError> {
    let file: ConfigFile = toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(max) = file.enumeration.max_devices {
        let max = usize::try_from(max)
            .ok()
            .filter(|&max| max > 0)
            .ok_or_else(|| invalid("enumeration.max_devices", "must be greater than zero"))?;
        config.enumeration.max_devices = Some(max);
    }

    if let Some(command) = file.events.command {
        config.events.command = expand_command(&command);
    }
    if let Some(args) = file.events.args {
        config.events.args = args;
    }

    if let Some(format) = file.output.format {
        config.output.format = format.parse()?;
    }

    if let Some(log_level) = file.telemetry.log_level {
        config.telemetry.log_level = log_level;
    }

    Ok(())
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Apply environment variable overrides to config.
///
/// Unparseable values are ignored and the previous value is kept.
pub fn apply_env_overrides(config: &mut JackConfig, sources: &mut ConfigSources) {
    if let Ok(v) = env::var("JACKWATCH_MAX_DEVICES") {
        match v.trim() {
            "" | "0" | "unbounded" => {
                config.enumeration.max_devices = None;
                sources.env_overrides.push("JACKWATCH_MAX_DEVICES".to_string());
            }
            n => {
                if let Ok(max) = n.parse() {
                    config.enumeration.max_devices = Some(max);
                    sources.env_overrides.push("JACKWATCH_MAX_DEVICES".to_string());
                }
            }
        }
    }

    if let Ok(v) = env::var("JACKWATCH_EVENT_COMMAND") {
        config.events.command = expand_command(&v);
        sources.env_overrides.push("JACKWATCH_EVENT_COMMAND".to_string());
    }

    if let Ok(v) = env::var("JACKWATCH_OUTPUT") {
        if let Ok(format) = v.parse::<OutputFormat>() {
            config.output.format = format;
            sources.env_overrides.push("JACKWATCH_OUTPUT".to_string());
        }
    }

    if let Ok(v) = env::var("JACKWATCH_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("JACKWATCH_LOG_LEVEL".to_string());
    }
    // RUST_LOG wins over everything else
    if let Ok(v) = env::var("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}

/// Expand a leading `~/` or `$VAR/` in a command path. Bare program names
/// (looked up on PATH) pass through untouched.
pub fn expand_command(command: &str) -> String {
    expand_path(command).to_string_lossy().into_owned()
}

/// Expand ~ and environment variables in a path.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(stripped);
        }
    } else if let Some(stripped) = path.strip_prefix('$') {
        let (var_name, rest) = match stripped.find('/') {
            Some(slash_pos) => (&stripped[..slash_pos], Some(&stripped[slash_pos + 1..])),
            None => (stripped, None),
        };
        if let Ok(var_value) = env::var(var_name) {
            let base = PathBuf::from(var_value);
            return match rest {
                Some(rest) => base.join(rest),
                None => base,
            };
        }
    }

    PathBuf::from(path)
}
