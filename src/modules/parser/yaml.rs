//! YAML configuration parser

use climate_api_core::{ClimateError, DatabaseConfig, Model, PoolConfig, ServerConfig};
use climate_api_types::Connector;
use serde::Deserialize;

use crate::env::EnvSubstitutor;

/// YAML parser for climate API configuration files
pub struct YamlParser;

/// On-disk config schema.
///
/// Looser than `Model`: the name is optional, `database` may be a bare URL
/// string, and `server.port` may be a number or a string.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    database: Option<RawDatabase>,

    #[serde(default)]
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDatabase {
    Url(String),
    Table {
        #[serde(default)]
        connector: Option<Connector>,

        #[serde(default)]
        url: Option<String>,

        /// Alternate field name.
        #[serde(default)]
        connection_string: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct RawServer {
    #[serde(default)]
    port: Option<serde_yaml::Value>,

    #[serde(default)]
    log_level: Option<u8>,

    #[serde(default)]
    pool: Option<PoolConfig>,
}

impl YamlParser {
    /// Parse a YAML string into a Model, substituting `{{ env.* }}` first
    pub fn parse(content: &str) -> Result<Model, ClimateError> {
        let substitutor = EnvSubstitutor::new();
        let substituted = substitutor.substitute(content)?;
        Self::parse_raw(&substituted)
    }

    /// Parse a YAML string without environment variable substitution
    pub fn parse_raw(content: &str) -> Result<Model, ClimateError> {
        let raw = serde_yaml::from_str::<RawConfig>(content)
            .map_err(|e| ClimateError::Config(format!("YAML parse error: {}", e)))?;
        raw_to_model(raw)
    }
}

fn raw_to_model(cfg: RawConfig) -> Result<Model, ClimateError> {
    let defaults = Model::default();

    let database = match cfg.database {
        None => defaults.database,
        Some(RawDatabase::Url(url)) => DatabaseConfig::from_url(url),
        Some(RawDatabase::Table {
            connector,
            url,
            connection_string,
        }) => {
            let url = url.or(connection_string).ok_or_else(|| {
                ClimateError::Config("'database' is missing 'url' (or 'connection_string')".into())
            })?;
            match connector {
                Some(connector) => DatabaseConfig::new(connector, url),
                None => DatabaseConfig::from_url(url),
            }
        }
    };

    let server = cfg.server.map(|s| ServerConfig {
        port: s.port.and_then(yaml_scalar_to_string),
        log_level: s.log_level,
        pool: s.pool,
    });

    Ok(Model {
        name: cfg.name.unwrap_or(defaults.name),
        database,
        server,
    })
}

fn yaml_scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s),
        // For non-scalars (seq/map), just serialize them.
        other => serde_yaml::to_string(&other)
            .ok()
            .map(|s| s.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_document_uses_defaults() {
        let model = YamlParser::parse("{}").unwrap();
        assert_eq!(model, Model::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
name: hawaii-climate
database:
  connector: postgres
  url: "postgres://climate@localhost:5432/hawaii"
server:
  port: 8080
  log_level: 2
  pool:
    max_connections: 4
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.name, "hawaii-climate");
        assert_eq!(model.database.connector, Connector::Postgres);
        assert_eq!(model.port(), 8080);
        assert_eq!(model.log_level(), 2);
        assert_eq!(model.pool().max_connections(), 4);
    }

    #[test]
    fn test_parse_url_shorthand_infers_connector() {
        let yaml = r#"
database: "postgresql://localhost/hawaii"
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.database.connector, Connector::Postgres);
        assert_eq!(model.database.url, "postgresql://localhost/hawaii");
    }

    #[test]
    fn test_parse_connection_string_alias() {
        let yaml = r#"
database:
  connection_string: "sqlite://data/hawaii.sqlite"
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.database.connector, Connector::Sqlite);
        assert_eq!(model.database.url, "sqlite://data/hawaii.sqlite");
    }

    #[test]
    fn test_parse_database_without_url() {
        let yaml = r#"
database:
  connector: sqlite
"#;
        let err = YamlParser::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("missing 'url'"));
    }

    #[test]
    fn test_parse_string_port() {
        let yaml = r#"
server:
  port: "5001"
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.port(), 5001);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let yaml = "invalid: yaml: content: [";
        assert!(YamlParser::parse(yaml).is_err());
    }
}
