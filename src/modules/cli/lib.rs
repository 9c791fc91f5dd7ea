//! Climate API CLI
//!
//! This crate provides the command-line interface including:
//! - run: Start the server
//! - check: Verify the store against the declared schema
//! - routes: Print the route table

pub mod commands;

pub use commands::{Cli, Commands};
