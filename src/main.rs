//! MSK cluster health check.
//!
//! # Architecture Overview
//!
//! ```text
//!   scheduler / CLI                         external collaborators
//!   ───────────────┐
//!                  ▼
//!          ┌──────────────┐   describe / list   ┌──────────────────────┐
//!          │    runner    │────────────────────▶│ cluster-management   │
//!          │  (batch.rs)  │                     │ REST API             │
//!          └──────┬───────┘                     └──────────────────────┘
//!                 │ descriptor
//!                 ▼
//!          ┌──────────────┐
//!          │    health    │  pure: state ∈ allow-list ?
//!          │  evaluator   │
//!          └──────┬───────┘
//!                 │ verdict
//!        ┌────────┴─────────┐
//!        ▼                  ▼
//!   metrics sink       notifier (only when unhealthy)
//! ```
//!
//! `msk-health run` performs one invocation and prints the response;
//! `msk-health watch` repeats it on the configured interval.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use msk_health::config::loader::{load_config, SystemEnv};
use msk_health::config::watcher::ConfigWatcher;
use msk_health::lifecycle::signals::wait_for_shutdown_signal;
use msk_health::lifecycle::startup::{build_runner, start_metrics_exporter};
use msk_health::lifecycle::Shutdown;
use msk_health::observability::logging::init_logging;
use msk_health::runner::Scheduler;

#[derive(Parser)]
#[command(name = "msk-health")]
#[command(about = "Health check for managed Kafka clusters", long_about = None)]
struct Cli {
    /// TOML configuration file. Environment variables override it.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log notifications instead of publishing them.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every cluster once and print the invocation response
    Run,
    /// Check every cluster on the configured interval until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), &SystemEnv) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    init_logging(&config.observability);
    tracing::info!("msk-health v{} starting", env!("CARGO_PKG_VERSION"));

    start_metrics_exporter(&config)?;
    let dry_run = cli.dry_run;
    let runner = build_runner(config, dry_run)?;

    match cli.command {
        Commands::Run => {
            let response = runner.invoke(serde_json::Value::Null).await;
            println!("{}", serde_json::to_string(&response)?);
        }
        Commands::Watch => {
            let shutdown = Shutdown::new();
            let (watcher, config_updates) = match &cli.config {
                Some(path) => {
                    let (watcher, updates) = ConfigWatcher::new(path);
                    (Some(watcher.run()?), updates)
                }
                None => (None, tokio::sync::mpsc::unbounded_channel().1),
            };

            let scheduler = Scheduler::new(runner, move |config| build_runner(config, dry_run));
            let scheduler = tokio::spawn(scheduler.run(config_updates, shutdown.subscribe()));

            wait_for_shutdown_signal().await;
            shutdown.trigger();

            let runs = scheduler.await?;
            drop(watcher);
            tracing::info!(runs, "Shutdown complete");
        }
    }

    Ok(())
}
