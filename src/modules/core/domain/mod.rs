//! Domain models for the climate API

mod database;
mod model;
mod observation;
mod routes;
mod schema;
mod types;

pub use database::{DatabaseConfig, DEFAULT_DATABASE_URL};
pub use model::Model;
pub use observation::{
    interleave_observations, precipitation_by_date, round_average, DateWindow, Observation,
    TemperatureAggregate, MOST_ACTIVE_STATION,
};
pub use routes::{home_page, Route};
pub use schema::{Schema, TableSchema, SCHEMA_VERSION};
pub use types::{PoolConfig, ServerConfig};
