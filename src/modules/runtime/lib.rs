//! HTTP query gateway for the climate API
//!
//! This crate provides the HTTP server, the store sessions and the request
//! handlers. Each request opens one session, runs one query and releases the
//! session before the response is written.

pub mod handlers;
pub mod server;
pub mod state;
pub mod store;

pub use handlers::{ApiError, ClimateHandler};
pub use server::{apply_overrides, build_router, Runtime};
pub use state::AppState;
pub use store::{connect, PostgresStore, Session, SqliteStore, Store};
