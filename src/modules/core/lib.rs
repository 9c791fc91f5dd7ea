//! Core domain logic for the climate API
//!
//! This crate contains the configuration model, the declared store schema,
//! the route table, the result-shaping rules and the error type.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::ClimateError;
