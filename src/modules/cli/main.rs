//! climate-api
//!
//! Command-line entry point for the climate observations HTTP API.

use clap::Parser;
use climate_api_cli::{Cli, Commands};
use climate_api_core::ClimateError;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ClimateError> {
    let cli = Cli::parse();

    // Never touches the store or the configuration
    if let Commands::Routes(cmd) = &cli.command {
        cmd.execute();
        return Ok(());
    }

    let model = cli.load_model()?;

    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level(&model).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    info!("Configuration: {} ({})", cli.config_path(), model.name);

    match cli.command {
        Commands::Run(cmd) => {
            cmd.execute(model).await?;
        }
        Commands::Check(cmd) => {
            cmd.execute(model).await?;
        }
        Commands::Routes(_) => {}
    }

    Ok(())
}
