//! CLI commands

mod check;
mod routes;
mod run;

pub use check::CheckCommand;
pub use routes::RoutesCommand;
pub use run::RunCommand;

use clap::{Parser, Subcommand};
use climate_api_core::{ClimateError, Model};
use climate_api_parser::{ConfigValidator, DEFAULT_CONFIG_FILE};
use climate_api_runtime::apply_overrides;
use tracing::Level;

/// climate-api - read-only HTTP API over climate observations
#[derive(Parser, Debug)]
#[command(name = "climate-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: climate.yaml, optional)
    ///
    /// This is a *global* option so it can be specified after subcommands,
    /// e.g. `climate-api run -f climate.yaml`.
    #[arg(short = 'f', long = "file", global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Run(RunCommand),

    /// Verify the store against the declared schema and exit
    Check(CheckCommand),

    /// Print the route table
    Routes(RoutesCommand),
}

/// Apply command-line overrides, then validate the result as if it had
/// been read from a config file
pub(crate) fn override_model(
    model: Model,
    port: Option<u16>,
    database_url: Option<String>,
) -> Result<Model, ClimateError> {
    let model = apply_overrides(model, port, database_url);
    ConfigValidator::new().validate(&model)?;
    Ok(model)
}

impl Cli {
    /// Effective configuration path
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_FILE)
    }

    /// Load the configuration.
    ///
    /// A missing file is only an error when the path was given explicitly.
    pub fn load_model(&self) -> Result<Model, ClimateError> {
        climate_api_parser::load(self.config_path(), self.config.is_some())
    }

    /// Log level from `--verbose`, else from the config's `log_level`
    pub fn log_level(&self, model: &Model) -> Level {
        if self.verbose {
            return Level::DEBUG;
        }
        match model.log_level() {
            0 => Level::DEBUG,
            1 => Level::INFO,
            2 => Level::WARN,
            _ => Level::ERROR,
        }
    }
}
