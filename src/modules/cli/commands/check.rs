//! Check command implementation

use clap::Args;
use climate_api_core::{ClimateError, Model, Schema};
use climate_api_runtime::connect;
use tracing::info;

use super::override_model;

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Override the store URL (connector is inferred from the scheme)
    #[arg(long = "database-url")]
    pub database_url: Option<String>,
}

impl CheckCommand {
    /// Connect to the store and compare it with the declared schema
    pub async fn execute(&self, model: Model) -> Result<(), ClimateError> {
        let model = override_model(model, None, self.database_url.clone())?;
        let schema = Schema::current();

        let store = connect(&model.database, &model.pool()).await?;
        let result = async {
            store.health_check().await?;
            store.verify_schema(&schema).await
        }
        .await;
        store.close().await;
        result?;

        info!("Schema check passed");
        println!(
            "✓ {} matches schema v{}",
            model.database.redacted_url(),
            schema.version
        );
        for table in schema.tables {
            println!("  {}", table);
        }

        Ok(())
    }
}
