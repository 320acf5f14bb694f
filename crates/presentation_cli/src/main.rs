//! Zustellkarte CLI
//!
//! Command-line interface for address resolution and position tracking.

use clap::Parser;
use infrastructure::{AppConfig, init_telemetry};
use presentation_cli::{Cli, Commands, commands, log_filter_from_verbosity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;

    let mut telemetry = config.telemetry.clone();
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        telemetry.log_filter = filter.to_string();
    }
    telemetry.json |= cli.json_logs;
    init_telemetry(&telemetry)?;

    match cli.command {
        Commands::Parse { address, json } => commands::parse(&address, json)?,
        Commands::Normalize { street } => commands::normalize(&street),
        Commands::Geocode {
            address,
            providers,
            json,
        } => commands::geocode(&config, &address, &providers, json).await?,
        Commands::Batch {
            input,
            providers,
            json,
        } => commands::batch(&config, input.as_deref(), &providers, json).await?,
        Commands::Track {
            input,
            max_accuracy,
            max_jump,
            json,
        } => commands::track(&config, input.as_deref(), max_accuracy, max_jump, json).await?,
        Commands::Config => commands::show_config(&config)?,
    }

    Ok(())
}
