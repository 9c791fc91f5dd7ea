//! HTTP request handlers for the climate API

mod climate;
mod error;

pub use climate::ClimateHandler;
pub use error::ApiError;
