//! PostgreSQL store implementation

use async_trait::async_trait;
use climate_api_core::{
    ClimateError, DateWindow, Observation, PoolConfig, TemperatureAggregate,
};
use climate_api_types::Connector;
use serde_json::Value;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow, Postgres};
use sqlx::{Column, Row};
use std::str::FromStr;
use tracing::trace;

use super::traits::{Session, Store};

// Dates are compared as text so a DATE column orders exactly like the
// SQLite string column does. prcp is read as a double whatever its
// declared type.
const PRECIPITATION: &str =
    "SELECT CAST(date AS TEXT), CAST(prcp AS DOUBLE PRECISION) FROM measurement";
const STATION_NAMES: &str = "SELECT name FROM station";
const STATION_OBSERVATIONS: &str =
    "SELECT CAST(date AS TEXT), tobs FROM measurement WHERE station = $1";
const AGGREGATE_FROM: &str = "SELECT MIN(tobs), CAST(AVG(tobs) AS DOUBLE PRECISION), MAX(tobs) \
     FROM measurement WHERE CAST(date AS TEXT) >= $1";
const AGGREGATE_BETWEEN: &str = "SELECT MIN(tobs), CAST(AVG(tobs) AS DOUBLE PRECISION), MAX(tobs) \
     FROM measurement WHERE CAST(date AS TEXT) >= $1 AND CAST(date AS TEXT) <= $2";
const TABLE_COLUMNS: &str = "SELECT CAST(column_name AS TEXT) FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1 ORDER BY ordinal_position";

/// PostgreSQL observation store; every connection runs read-only transactions
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect with default pool settings
    pub async fn new(url: &str) -> Result<Self, ClimateError> {
        Self::with_config(url, &PoolConfig::default()).await
    }

    /// Connect with custom pool settings
    pub async fn with_config(url: &str, config: &PoolConfig) -> Result<Self, ClimateError> {
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| ClimateError::Database(format!("Invalid PostgreSQL URL: {}", e)))?
            .options([("default_transaction_read_only", "on")]);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .connect_with(options)
            .await
            .map_err(|e| ClimateError::Database(format!("PostgreSQL connection failed: {}", e)))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn session(&self) -> Result<Box<dyn Session>, ClimateError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| ClimateError::Database(format!("PostgreSQL acquire failed: {}", e)))?;
        trace!("PostgreSQL session acquired");
        Ok(Box::new(PostgresSession { conn }))
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn health_check(&self) -> Result<(), ClimateError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                ClimateError::Database(format!("PostgreSQL health check failed: {}", e))
            })?;
        Ok(())
    }

    fn connector_type(&self) -> Connector {
        Connector::Postgres
    }
}

/// A single pooled PostgreSQL connection held for one request
pub struct PostgresSession {
    conn: PoolConnection<Postgres>,
}

impl Drop for PostgresSession {
    fn drop(&mut self) {
        trace!("PostgreSQL session released");
    }
}

impl PostgresSession {
    async fn fetch_all(
        &mut self,
        statement: &str,
        binds: &[&str],
    ) -> Result<Vec<PgRow>, ClimateError> {
        let mut query = sqlx::query(statement);
        for value in binds {
            query = query.bind(*value);
        }
        query
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| ClimateError::QueryExecution(format!("PostgreSQL query failed: {}", e)))
    }

    fn observations(rows: &[PgRow]) -> Result<Vec<Observation>, ClimateError> {
        rows.iter()
            .map(|row| {
                let date = row.try_get::<String, _>(0).map_err(|e| {
                    ClimateError::QueryExecution(format!("Unreadable date column: {}", e))
                })?;
                Ok(Observation {
                    date,
                    value: column_value(row, 1)?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl Session for PostgresSession {
    async fn precipitation(&mut self) -> Result<Vec<Observation>, ClimateError> {
        let rows = self.fetch_all(PRECIPITATION, &[]).await?;
        Self::observations(&rows)
    }

    async fn station_names(&mut self) -> Result<Vec<Value>, ClimateError> {
        let rows = self.fetch_all(STATION_NAMES, &[]).await?;
        rows.iter().map(|row| column_value(row, 0)).collect()
    }

    async fn station_observations(
        &mut self,
        station: &str,
    ) -> Result<Vec<Observation>, ClimateError> {
        let rows = self.fetch_all(STATION_OBSERVATIONS, &[station]).await?;
        Self::observations(&rows)
    }

    async fn temperature_aggregate(
        &mut self,
        window: &DateWindow,
    ) -> Result<TemperatureAggregate, ClimateError> {
        let rows = match &window.end {
            None => {
                self.fetch_all(AGGREGATE_FROM, &[window.start.as_str()])
                    .await?
            }
            Some(end) => {
                self.fetch_all(AGGREGATE_BETWEEN, &[window.start.as_str(), end.as_str()])
                    .await?
            }
        };

        let Some(row) = rows.first() else {
            return Ok(TemperatureAggregate::default());
        };

        Ok(TemperatureAggregate {
            min: column_value(row, 0)?,
            avg: row.try_get::<Option<f64>, _>(1).map_err(decode_error)?,
            max: column_value(row, 2)?,
        })
    }

    async fn table_columns(&mut self, table: &str) -> Result<Vec<String>, ClimateError> {
        let rows = self.fetch_all(TABLE_COLUMNS, &[table]).await?;
        rows.iter()
            .map(|row| {
                row.try_get::<String, _>(0)
                    .map_err(|e| ClimateError::QueryExecution(format!("Bad column name: {}", e)))
            })
            .collect()
    }
}

/// How a result column is decoded into JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Bool,
    Text,
}

/// Map a PostgreSQL type name to its decoder.
///
/// Types without a JSON mapping (NUMERIC, arrays, ...) are a query error,
/// never a silent null.
fn column_kind(type_name: &str) -> Result<ColumnKind, ClimateError> {
    match type_name {
        "INT2" => Ok(ColumnKind::Int2),
        "INT4" => Ok(ColumnKind::Int4),
        "INT8" => Ok(ColumnKind::Int8),
        "FLOAT4" => Ok(ColumnKind::Float4),
        "FLOAT8" => Ok(ColumnKind::Float8),
        "BOOL" => Ok(ColumnKind::Bool),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Ok(ColumnKind::Text),
        other => Err(ClimateError::QueryExecution(format!(
            "Unsupported PostgreSQL column type {}",
            other
        ))),
    }
}

fn decode_error(e: sqlx::Error) -> ClimateError {
    ClimateError::QueryExecution(format!("Undecodable PostgreSQL value: {}", e))
}

/// Get a column value as a JSON value; SQL NULL becomes `null`
fn column_value(row: &PgRow, idx: usize) -> Result<Value, ClimateError> {
    use sqlx::TypeInfo;

    let column = row
        .columns()
        .get(idx)
        .ok_or_else(|| ClimateError::QueryExecution(format!("Missing result column {}", idx)))?;

    let value = match column_kind(column.type_info().name())? {
        ColumnKind::Int2 => row
            .try_get::<Option<i16>, _>(idx)
            .map_err(decode_error)?
            .map(Value::from),
        ColumnKind::Int4 => row
            .try_get::<Option<i32>, _>(idx)
            .map_err(decode_error)?
            .map(Value::from),
        ColumnKind::Int8 => row
            .try_get::<Option<i64>, _>(idx)
            .map_err(decode_error)?
            .map(Value::from),
        ColumnKind::Float4 => row
            .try_get::<Option<f32>, _>(idx)
            .map_err(decode_error)?
            .map(Value::from),
        ColumnKind::Float8 => row
            .try_get::<Option<f64>, _>(idx)
            .map_err(decode_error)?
            .map(Value::from),
        ColumnKind::Bool => row
            .try_get::<Option<bool>, _>(idx)
            .map_err(decode_error)?
            .map(Value::Bool),
        ColumnKind::Text => row
            .try_get::<Option<String>, _>(idx)
            .map_err(decode_error)?
            .map(Value::String),
    };

    Ok(value.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires a running PostgreSQL instance
    async fn test_postgres_connection() {
        let store = PostgresStore::new("postgres://localhost/hawaii").await;
        assert!(store.is_ok());
    }

    #[test]
    fn test_column_kind_maps_supported_types() {
        assert_eq!(column_kind("INT4").unwrap(), ColumnKind::Int4);
        assert_eq!(column_kind("INT8").unwrap(), ColumnKind::Int8);
        assert_eq!(column_kind("FLOAT8").unwrap(), ColumnKind::Float8);
        assert_eq!(column_kind("VARCHAR").unwrap(), ColumnKind::Text);
    }

    #[test]
    fn test_column_kind_rejects_numeric() {
        let err = column_kind("NUMERIC").unwrap_err();
        assert!(matches!(err, ClimateError::QueryExecution(_)));
        assert_eq!(err.sanitized_message(), "Query execution failed");
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let result = PostgresStore::new("not a url").await;
        assert!(matches!(result, Err(ClimateError::Database(_))));
    }
}
