//! Store and session trait definitions

use async_trait::async_trait;
use climate_api_core::{ClimateError, DateWindow, Observation, Schema, TemperatureAggregate};
use climate_api_types::Connector;
use tracing::debug;

/// A pooled, read-only observation store.
///
/// Implementations hold no per-request state; everything a request needs is
/// reached through the [`Session`] returned by [`Store::session`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Acquire a connection for the duration of one request
    async fn session(&self) -> Result<Box<dyn Session>, ClimateError>;

    /// Close the pool and release all connections
    async fn close(&self);

    /// Check if the store answers a trivial query
    async fn health_check(&self) -> Result<(), ClimateError>;

    /// Get the connector type
    fn connector_type(&self) -> Connector;

    /// Check every declared table against the live store.
    ///
    /// Fails on the first table that is missing or lacks a declared column.
    async fn verify_schema(&self, schema: &Schema) -> Result<(), ClimateError> {
        let mut session = self.session().await?;
        for table in schema.tables {
            let columns = session.table_columns(table.name).await?;
            table.check(&columns)?;
            debug!("Schema v{}: {} ok", schema.version, table);
        }
        Ok(())
    }
}

/// One request's connection to the store.
///
/// Dropping the session returns its connection to the pool, whichever way
/// the request ends.
#[async_trait]
pub trait Session: Send {
    /// Every `(date, prcp)` row of the measurement table, in store order
    async fn precipitation(&mut self) -> Result<Vec<Observation>, ClimateError>;

    /// Every station name, in store order
    async fn station_names(&mut self) -> Result<Vec<serde_json::Value>, ClimateError>;

    /// `(date, tobs)` rows for one station, in store order
    async fn station_observations(
        &mut self,
        station: &str,
    ) -> Result<Vec<Observation>, ClimateError>;

    /// MIN/AVG/MAX of `tobs` over rows whose date text falls in the window
    async fn temperature_aggregate(
        &mut self,
        window: &DateWindow,
    ) -> Result<TemperatureAggregate, ClimateError>;

    /// Column names of a table; empty if the table does not exist
    async fn table_columns(&mut self, table: &str) -> Result<Vec<String>, ClimateError>;
}
