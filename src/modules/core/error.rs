//! Error types for the climate API

use thiserror::Error;

/// Main error type for climate API operations
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Configuration file parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database connection error
    #[error("Database error: {0}")]
    Database(String),

    /// Query execution error
    #[error("Query execution failed: {0}")]
    QueryExecution(String),

    /// Live store does not match the declared schema
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),

    /// Environment variable not found
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
}

impl ClimateError {
    /// Returns true if this error should be logged at error level
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ClimateError::Database(_)
                | ClimateError::QueryExecution(_)
                | ClimateError::SchemaMismatch(_)
                | ClimateError::Server(_)
        )
    }

    /// Returns the appropriate HTTP status code for this error.
    ///
    /// Path parameters are never validated, so nothing maps to a 4xx.
    pub fn status_code(&self) -> u16 {
        500
    }

    /// Sanitize the error message to avoid leaking sensitive information
    pub fn sanitized_message(&self) -> String {
        match self {
            // Don't expose connection details
            ClimateError::Database(_) => "Database connection error".to_string(),

            // Don't expose statements or driver messages
            ClimateError::QueryExecution(_) => "Query execution failed".to_string(),

            _ => self.to_string(),
        }
    }
}

/// Result type alias using ClimateError
pub type Result<T> = std::result::Result<T, ClimateError>;
