//! Store construction from configuration

use climate_api_core::{ClimateError, DatabaseConfig, PoolConfig};
use climate_api_types::Connector;
use std::sync::Arc;
use tracing::info;

use super::postgres::PostgresStore;
use super::sqlite::SqliteStore;
use super::traits::Store;

/// Open the store described by `database`.
///
/// Fails immediately if the store cannot be reached; nothing is retried.
pub async fn connect(
    database: &DatabaseConfig,
    pool: &PoolConfig,
) -> Result<Arc<dyn Store>, ClimateError> {
    info!(
        "Connecting to {} store at {}",
        database.connector,
        database.redacted_url()
    );

    let store: Arc<dyn Store> = match database.connector {
        Connector::Sqlite => Arc::new(SqliteStore::with_config(&database.url, pool).await?),
        Connector::Postgres => Arc::new(PostgresStore::with_config(&database.url, pool).await?),
    };

    Ok(store)
}
