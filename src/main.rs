//! Empleo Monitor CLI
//!
//! Single-shot checker for the Santa Fe employment portal. One invocation
//! performs one pass: fetch, extract, diff against the previous snapshot,
//! notify, persist. Scheduling is left to cron or a CI workflow.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use empleo_monitor::{
    error::Result,
    models::Config,
    pipeline,
    services::ListingExtractor,
    storage::{LocalStateStore, StateStore},
};

/// Empleo Monitor - Santa Fe job listing watcher
#[derive(Parser, Debug)]
#[command(
    name = "empleo-monitor",
    version,
    about = "Monitors the Santa Fe public employment portal for new job listings"
)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, default_value = "monitor.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one monitoring pass
    Check {
        /// Report what would happen without notifying or persisting
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration and selector chains
    Validate,

    /// Show current snapshot info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config).with_env_credentials();
    let store = LocalStateStore::new(&config.storage.state_file);

    match cli.command {
        Command::Check { dry_run } => {
            config.validate()?;

            match pipeline::run_check(&config, &store, dry_run).await? {
                Some(report) => {
                    log::info!(
                        "Check complete: {} listings, {} new",
                        report.total,
                        report.new_listings.len()
                    );
                }
                None => {
                    log::warn!("Check aborted; nothing notified or persisted.");
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK");

            // Compiling the chains catches selector typos before a real run
            if let Err(e) = ListingExtractor::new(&config) {
                log::error!("Selector validation failed: {}", e);
                return Err(e);
            }
            log::info!("Selector chains OK");

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("State file: {}", config.storage.state_file);

            let listings = store.load().await;
            if listings.is_empty() {
                log::info!("No snapshot found yet.");
            } else {
                log::info!("Known listings: {}", listings.len());
                if let Some(latest) = listings.iter().map(|l| l.detected_at).max() {
                    log::info!("Most recent detection: {}", latest);
                }
            }
        }
    }

    Ok(())
}
