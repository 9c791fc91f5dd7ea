//! Run command implementation

use clap::Args;
use climate_api_core::{ClimateError, Model};
use climate_api_runtime::Runtime;

use super::override_model;

/// Run command arguments
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Override server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the store URL (connector is inferred from the scheme)
    #[arg(long = "database-url")]
    pub database_url: Option<String>,
}

impl RunCommand {
    /// Execute the run command
    pub async fn execute(&self, model: Model) -> Result<(), ClimateError> {
        let model = override_model(model, self.port, self.database_url.clone())?;

        // Fails here if the store is unreachable or its schema does not match
        let runtime = Runtime::new(model).await?;
        runtime.run().await?;

        Ok(())
    }
}
