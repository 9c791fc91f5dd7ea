//! Root model configuration

use serde::{Deserialize, Serialize};

use super::types::DEFAULT_PORT;
use super::{DatabaseConfig, PoolConfig, ServerConfig};

/// Root configuration model that represents a climate API configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Name of the deployment
    pub name: String,

    /// Backing store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Server configuration (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Model {
    /// Create a new model with the given name and the default store
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database: DatabaseConfig::default(),
            server: None,
        }
    }

    /// Replace the store configuration
    pub fn with_database(mut self, database: DatabaseConfig) -> Self {
        self.database = database;
        self
    }

    /// Get the server port, defaulting to 5000
    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port.as_ref())
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    /// Get the log level, defaulting to 1 (INFO)
    pub fn log_level(&self) -> u8 {
        self.server.as_ref().and_then(|s| s.log_level).unwrap_or(1)
    }

    /// Get the pool configuration, falling back to defaults
    pub fn pool(&self) -> PoolConfig {
        self.server
            .as_ref()
            .and_then(|s| s.pool.clone())
            .unwrap_or_default()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("hawaii-climate")
    }
}
