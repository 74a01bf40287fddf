//! Indicator Sensors Daemon
//!
//! Discovers hardware sensors and polls them, logging value changes and read
//! errors.

mod config;
mod monitor;
mod snapshot;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicator_sensors_hw::SysfsLibrary;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use monitor::Monitor;

const DEFAULT_CONFIG: &str = "/etc/indicator-sensors/config.toml";

#[derive(Parser)]
#[command(name = "indicator-sensorsd")]
#[command(about = "Hardware sensor monitoring daemon")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll sensors until interrupted (default)
    Run,
    /// Print every discovered sensor once
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load_or_default(DEFAULT_CONFIG).context("Failed to load configuration")?,
    };

    let library = SysfsLibrary::scan(&config.hwmon.root).with_context(|| {
        format!(
            "Failed to scan hwmon devices in {}",
            config.hwmon.root.display()
        )
    })?;
    let mut monitor = Monitor::new(library, config.temperature.scale);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(monitor, &config).await,
        Commands::List { json } => {
            monitor.poll()?;
            let snapshots = snapshot::collect(monitor.manager());
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshots)?);
            } else {
                print!("{}", snapshot::table(&snapshots));
            }
            monitor.shutdown();
            Ok(())
        }
    }
}

async fn run(mut monitor: Monitor<SysfsLibrary>, config: &Config) -> Result<()> {
    if monitor.manager().is_empty() {
        info!("No sensors found in {}", config.hwmon.root.display());
    }
    monitor.watch();

    // Setup Unix signal handlers
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down");
            }
        }
    };

    info!(
        "Polling {} sensors every {}ms",
        monitor.manager().len(),
        config.poll
    );
    monitor
        .run(Duration::from_millis(config.poll), shutdown)
        .await?;
    monitor.shutdown();
    Ok(())
}
