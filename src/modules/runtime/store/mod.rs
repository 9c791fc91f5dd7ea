//! Observation store backends
//!
//! A [`Store`] owns a connection pool. A [`Session`] wraps one pooled
//! connection for the lifetime of a single request and hands it back to the
//! pool when dropped.

mod connect;
mod postgres;
mod sqlite;
mod traits;

pub use connect::connect;
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;
pub use traits::{Session, Store};
