//! Store connector type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported relational store connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Connector {
    /// SQLite database file
    #[default]
    Sqlite,
    /// PostgreSQL database
    Postgres,
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::Sqlite => write!(f, "sqlite"),
            Connector::Postgres => write!(f, "postgres"),
        }
    }
}

impl FromStr for Connector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Connector::Sqlite),
            "postgres" | "postgresql" => Ok(Connector::Postgres),
            _ => Err(format!("Unknown connector type: {}", s)),
        }
    }
}

impl Connector {
    /// Returns all supported connector types
    pub fn all() -> &'static [Connector] {
        &[Connector::Sqlite, Connector::Postgres]
    }

    /// URL schemes accepted for this connector
    pub fn url_schemes(&self) -> &'static [&'static str] {
        match self {
            Connector::Sqlite => &["sqlite:"],
            Connector::Postgres => &["postgres://", "postgresql://"],
        }
    }

    /// Returns true if the URL uses a scheme this connector understands
    pub fn accepts_url(&self, url: &str) -> bool {
        self.url_schemes().iter().any(|scheme| url.starts_with(scheme))
    }

    /// Guess the connector from a connection URL
    pub fn from_url(url: &str) -> Option<Connector> {
        Self::all().iter().copied().find(|c| c.accepts_url(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_from_str() {
        assert_eq!(Connector::from_str("sqlite").unwrap(), Connector::Sqlite);
        assert_eq!(Connector::from_str("SQLite3").unwrap(), Connector::Sqlite);
        assert_eq!(Connector::from_str("postgres").unwrap(), Connector::Postgres);
        assert_eq!(Connector::from_str("postgresql").unwrap(), Connector::Postgres);
        assert!(Connector::from_str("redis").is_err());
    }

    #[test]
    fn test_connector_display() {
        assert_eq!(Connector::Sqlite.to_string(), "sqlite");
        assert_eq!(Connector::Postgres.to_string(), "postgres");
    }

    #[test]
    fn test_connector_serde() {
        let json = serde_json::to_string(&Connector::Postgres).unwrap();
        assert_eq!(json, "\"postgres\"");

        let connector: Connector = serde_json::from_str("\"sqlite\"").unwrap();
        assert_eq!(connector, Connector::Sqlite);
    }

    #[test]
    fn test_connector_from_url() {
        assert_eq!(
            Connector::from_url("sqlite://Resources/hawaii.sqlite"),
            Some(Connector::Sqlite)
        );
        assert_eq!(Connector::from_url("sqlite::memory:"), Some(Connector::Sqlite));
        assert_eq!(
            Connector::from_url("postgresql://localhost/climate"),
            Some(Connector::Postgres)
        );
        assert_eq!(Connector::from_url("mysql://localhost/climate"), None);
    }
}
