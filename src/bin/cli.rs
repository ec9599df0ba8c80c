//! hubsync CLI
//!
//! Local execution entry point. Each subcommand is one scheduled sync job;
//! an external scheduler invokes exactly one per run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hubsync::{config::Secrets, error::Result, jobs, models::Config};

/// hubsync - SaaS data sync jobs
#[derive(Parser, Debug)]
#[command(name = "hubsync", version, about = "Scheduled SaaS data sync jobs")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate Greenhouse job boards into the listings table
    Listings,

    /// Sync Circle supply and CoinGecko volume metrics
    Stablecoins,

    /// Sync Circle yield rates
    YieldRates,

    /// Recompute the projected-revenue field across CRM line items
    LineItems,

    /// Export yesterday's closed-ticket contacts to Qualtrics
    Surveys,

    /// Validate the configuration file
    Validate,
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

    log::info!("hubsync starting...");

    let config = Config::load_or_default(&cli.config);
    config.validate()?;
    let secrets = Secrets::from_env();

    match cli.command {
        Command::Listings => jobs::run_listings(&config, &secrets).await?,
        Command::Stablecoins => jobs::run_stablecoins(&config, &secrets).await?,
        Command::YieldRates => jobs::run_yield_rates(&config, &secrets).await?,
        Command::LineItems => jobs::run_line_items(&config, &secrets).await?,
        Command::Surveys => jobs::run_surveys(&config, &secrets).await?,
        Command::Validate => {
            log::info!("Validating configuration...");
            log::info!("✓ Config OK (boards, tables, and chain mappings)");
        }
    }

    log::info!("Done!");

    Ok(())
}
