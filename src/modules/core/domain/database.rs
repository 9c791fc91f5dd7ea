//! Backing store configuration

use climate_api_types::Connector;
use serde::{Deserialize, Serialize};

/// Default location of the observations database
pub const DEFAULT_DATABASE_URL: &str = "sqlite://Resources/hawaii.sqlite";

/// Backing store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store connector type
    #[serde(default)]
    pub connector: Connector,

    /// Connection URL (supports environment variable substitution)
    pub url: String,
}

impl DatabaseConfig {
    /// Create a new database configuration
    pub fn new(connector: Connector, url: impl Into<String>) -> Self {
        Self {
            connector,
            url: url.into(),
        }
    }

    /// Build a configuration from a URL alone, inferring the connector
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let connector = Connector::from_url(&url).unwrap_or_default();
        Self { connector, url }
    }

    /// Check if the URL contains environment variable placeholders
    pub fn has_env_placeholders(&self) -> bool {
        self.url.contains("{{") && self.url.contains("}}")
    }

    /// URL with any password replaced, for logging
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.split_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
            None => self.url.clone(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(Connector::Sqlite, DEFAULT_DATABASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_default() {
        let db = DatabaseConfig::default();
        assert_eq!(db.connector, Connector::Sqlite);
        assert_eq!(db.url, "sqlite://Resources/hawaii.sqlite");
    }

    #[test]
    fn test_database_from_url() {
        let db = DatabaseConfig::from_url("postgres://localhost/climate");
        assert_eq!(db.connector, Connector::Postgres);

        let db = DatabaseConfig::from_url("sqlite://data.sqlite");
        assert_eq!(db.connector, Connector::Sqlite);
    }

    #[test]
    fn test_database_env_placeholders() {
        let db = DatabaseConfig::new(Connector::Postgres, "{{ env.DATABASE_URL }}");
        assert!(db.has_env_placeholders());
        assert!(!DatabaseConfig::default().has_env_placeholders());
    }

    #[test]
    fn test_redacted_url() {
        let db = DatabaseConfig::from_url("postgres://climate:hunter2@db:5432/hawaii");
        assert_eq!(db.redacted_url(), "postgres://climate:***@db:5432/hawaii");

        let db = DatabaseConfig::default();
        assert_eq!(db.redacted_url(), "sqlite://Resources/hawaii.sqlite");
    }

    #[test]
    fn test_database_serde_defaults_connector() {
        let db: DatabaseConfig = serde_json::from_str(r#"{"url": "sqlite::memory:"}"#).unwrap();
        assert_eq!(db.connector, Connector::Sqlite);
    }
}
