//! jackwatch - list audio endpoints, then report jack plug/unplug events
//!
//! Subcommands:
//! - `jackwatch run` (default) - list devices, then monitor `acpi_listen`
//! - `jackwatch list` - list devices and exit
//! - `jackwatch monitor` - monitor only
//! - `jackwatch config` - print the effective configuration
//!
//! Exit status: 0 after a signal-driven shutdown or a one-shot command,
//! 1 when the event source cannot be started or closes, 2 on bad config.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jackconf::{ConfigError, ConfigSources, JackConfig, OutputFormat};
use jackwatch::{
    enumerate_devices, monitor_events, AlsaSoundSystem, LineSource, ProcessLineSource,
    ReaderLineSource, Reporter,
};
use std::future::Future;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};

mod telemetry;

#[derive(Parser)]
#[command(name = "jackwatch")]
#[command(about = "List ALSA audio endpoints and report headphone/microphone jack events")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to load instead of ./jackwatch.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Maximum number of devices to list (0 = unbounded)
    #[arg(long, global = true)]
    max_devices: Option<usize>,

    /// Event source command, or "-" to read events from stdin
    #[arg(long, global = true)]
    source: Option<String>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// List devices, then monitor jack events until interrupted
    Run,

    /// List devices and exit
    List,

    /// Monitor jack events without listing devices
    Monitor,

    /// Print the effective configuration as TOML
    Config,
}

fn parse_format(s: &str) -> Result<OutputFormat, ConfigError> {
    s.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("jackwatch: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(run(cli));
    // a pending stdin read cannot be cancelled, so do not wait on it
    runtime.shutdown_background();
    code
}

async fn run(cli: Cli) -> ExitCode {
    let (config, sources) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("jackwatch: {:#}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = telemetry::init(&config.telemetry.log_level) {
        eprintln!("jackwatch: {:#}", e);
    }
    debug!(
        "Config files: {:?}, env overrides: {:?}",
        sources.files, sources.env_overrides
    );

    let mut reporter = Reporter::new(io::stdout(), config.output.format);

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => match list_devices(&config, &mut reporter) {
            Ok(()) => monitor(&config, &mut reporter).await,
            Err(e) => Err(e),
        },
        Commands::List => list_devices(&config, &mut reporter),
        Commands::Monitor => monitor(&config, &mut reporter).await,
        Commands::Config => {
            print!("{}", config.to_toml());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Files and env first, then command-line flags on top.
fn load_config(cli: &Cli) -> Result<(JackConfig, ConfigSources)> {
    let (mut config, sources) = JackConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(max) = cli.max_devices {
        config.enumeration.max_devices = (max > 0).then_some(max);
    }
    if let Some(source) = &cli.source {
        config.events.command = source.clone();
        config.events.args.clear();
    }

    Ok((config, sources))
}

fn list_devices(config: &JackConfig, reporter: &mut Reporter<Stdout>) -> Result<()> {
    let devices = enumerate_devices(&AlsaSoundSystem::new(), config.enumeration.max_devices);
    info!("Enumerated {} audio devices", devices.len());

    reporter
        .devices(&devices)
        .context("Failed to write device list")
}

async fn monitor(config: &JackConfig, reporter: &mut Reporter<Stdout>) -> Result<()> {
    // handlers must exist before the banner is printed
    let shutdown = shutdown_signal();

    let events = &config.events;
    let source_name = if events.reads_stdin() { "stdin" } else { events.command.as_str() };
    reporter
        .monitoring(source_name)
        .context("Failed to write monitor banner")?;

    let mut source: Box<dyn LineSource> = if events.reads_stdin() {
        Box::new(ReaderLineSource::stdin())
    } else {
        Box::new(ProcessLineSource::spawn(&events.command, &events.args)?)
    };

    let result = monitor_events(source.as_mut(), reporter, shutdown).await;
    source.close().await;

    let stats = result?;
    info!(
        "Monitored {} lines ({} transitions, {} unresolved, {} other)",
        stats.lines, stats.transitions, stats.unresolved, stats.other
    );
    Ok(())
}

/// Resolves on SIGINT or SIGTERM. Handlers are registered when this is
/// called, not when the future is first polled.
#[cfg(unix)]
fn shutdown_signal() -> impl Future<Output = ()> {
    use tokio::signal::unix::{signal, SignalKind};

    let interrupt = signal(SignalKind::interrupt());
    let terminate = signal(SignalKind::terminate());

    async move {
        tokio::select! {
            _ = wait_for(interrupt, "SIGINT") => {
                info!("Received SIGINT, shutting down...");
            }
            _ = wait_for(terminate, "SIGTERM") => {
                info!("Received SIGTERM, shutting down...");
            }
        }
    }
}

#[cfg(unix)]
async fn wait_for(signal: io::Result<tokio::signal::unix::Signal>, name: &str) {
    match signal {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(e) => {
            warn!("Failed to listen for {}: {}", name, e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
fn shutdown_signal() -> impl Future<Output = ()> {
    async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl-C, shutting down...");
    }
}
