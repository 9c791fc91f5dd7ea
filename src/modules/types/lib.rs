//! Type definitions for the climate API
//!
//! This crate contains shared type definitions used across the workspace,
//! including the supported store connectors and the HTTP response shapes.

pub mod connector;
pub mod runtime;

pub use connector::Connector;
pub use runtime::{ErrorResponse, TemperatureSummary};
