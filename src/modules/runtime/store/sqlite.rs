//! SQLite store implementation

use async_trait::async_trait;
use climate_api_core::{
    ClimateError, DateWindow, Observation, PoolConfig, TemperatureAggregate,
};
use climate_api_types::Connector;
use serde_json::Value;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, TypeInfo, ValueRef};
use std::str::FromStr;
use tracing::trace;

use super::traits::{Session, Store};

/// SQLite observation store, opened read-only
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a SQLite store with default pool settings
    pub async fn new(url: &str) -> Result<Self, ClimateError> {
        Self::with_config(url, &PoolConfig::default()).await
    }

    /// Open a SQLite store with custom pool settings
    pub async fn with_config(url: &str, config: &PoolConfig) -> Result<Self, ClimateError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClimateError::Database(format!("Invalid SQLite URL: {}", e)))?
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .connect_with(options)
            .await
            .map_err(|e| ClimateError::Database(format!("SQLite connection failed: {}", e)))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn session(&self) -> Result<Box<dyn Session>, ClimateError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| ClimateError::Database(format!("SQLite acquire failed: {}", e)))?;
        trace!("SQLite session acquired");
        Ok(Box::new(SqliteSession { conn }))
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn health_check(&self) -> Result<(), ClimateError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ClimateError::Database(format!("SQLite health check failed: {}", e)))?;
        Ok(())
    }

    fn connector_type(&self) -> Connector {
        Connector::Sqlite
    }
}

/// A single pooled SQLite connection held for one request
pub struct SqliteSession {
    conn: PoolConnection<Sqlite>,
}

impl Drop for SqliteSession {
    fn drop(&mut self) {
        trace!("SQLite session released");
    }
}

impl SqliteSession {
    async fn fetch_observations(
        &mut self,
        statement: &str,
        station: Option<&str>,
    ) -> Result<Vec<Observation>, ClimateError> {
        let mut query = sqlx::query(statement);
        if let Some(station) = station {
            query = query.bind(station);
        }
        let rows = query
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| ClimateError::QueryExecution(format!("SQLite query failed: {}", e)))?;

        rows.iter()
            .map(|row| {
                let date = row_date(row)?;
                Ok(Observation {
                    date,
                    value: column_value(row, 1)?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl Session for SqliteSession {
    async fn precipitation(&mut self) -> Result<Vec<Observation>, ClimateError> {
        self.fetch_observations("SELECT date, prcp FROM measurement", None)
            .await
    }

    async fn station_names(&mut self) -> Result<Vec<Value>, ClimateError> {
        let rows = sqlx::query("SELECT name FROM station")
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| ClimateError::QueryExecution(format!("SQLite query failed: {}", e)))?;

        rows.iter().map(|row| column_value(row, 0)).collect()
    }

    async fn station_observations(
        &mut self,
        station: &str,
    ) -> Result<Vec<Observation>, ClimateError> {
        self.fetch_observations(
            "SELECT date, tobs FROM measurement WHERE station = ?1",
            Some(station),
        )
        .await
    }

    async fn temperature_aggregate(
        &mut self,
        window: &DateWindow,
    ) -> Result<TemperatureAggregate, ClimateError> {
        let query = match &window.end {
            None => sqlx::query(
                "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement WHERE date >= ?1",
            )
            .bind(window.start.as_str()),
            Some(end) => sqlx::query(
                "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement \
                 WHERE date >= ?1 AND date <= ?2",
            )
            .bind(window.start.as_str())
            .bind(end.as_str()),
        };

        let row = query
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|e| ClimateError::QueryExecution(format!("SQLite query failed: {}", e)))?;

        Ok(TemperatureAggregate {
            min: column_value(&row, 0)?,
            avg: column_f64(&row, 1)?,
            max: column_value(&row, 2)?,
        })
    }

    async fn table_columns(&mut self, table: &str) -> Result<Vec<String>, ClimateError> {
        let rows = sqlx::query("SELECT name FROM pragma_table_info(?1)")
            .bind(table)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| ClimateError::QueryExecution(format!("SQLite query failed: {}", e)))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>(0)
                    .map_err(|e| ClimateError::QueryExecution(format!("Bad column name: {}", e)))
            })
            .collect()
    }
}

/// Read the date column as text
fn row_date(row: &SqliteRow) -> Result<String, ClimateError> {
    row.try_get::<String, _>(0)
        .map_err(|e| ClimateError::QueryExecution(format!("Unreadable date column: {}", e)))
}

/// Read a numeric column that may be NULL as f64
fn column_f64(row: &SqliteRow, idx: usize) -> Result<Option<f64>, ClimateError> {
    Ok(match column_value(row, idx)? {
        Value::Number(n) => n.as_f64(),
        _ => None,
    })
}

fn decode_error(e: sqlx::Error) -> ClimateError {
    ClimateError::QueryExecution(format!("Undecodable SQLite value: {}", e))
}

/// Get a column value as a JSON value.
///
/// SQLite is dynamically typed, so the storage class of the value itself
/// decides the JSON type, not the declared column type. A BLOB has no JSON
/// mapping and fails the query.
fn column_value(row: &SqliteRow, idx: usize) -> Result<Value, ClimateError> {
    let type_name = {
        let raw = row.try_get_raw(idx).map_err(decode_error)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };

    match type_name.as_str() {
        "INTEGER" => Ok(Value::from(row.try_get::<i64, _>(idx).map_err(decode_error)?)),
        // Non-finite REALs have no JSON number and serialize as null
        "REAL" => Ok(Value::from(row.try_get::<f64, _>(idx).map_err(decode_error)?)),
        "TEXT" => Ok(Value::String(
            row.try_get::<String, _>(idx).map_err(decode_error)?,
        )),
        other => Err(ClimateError::QueryExecution(format!(
            "Unsupported SQLite value of type {} in column {}",
            other, idx
        ))),
    }
}
