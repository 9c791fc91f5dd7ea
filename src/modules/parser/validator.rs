//! Configuration validation

use climate_api_core::{ClimateError, Model};
use climate_api_types::Connector;
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex pattern for valid names (lower-kebab-case or lower_snake_case)
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:[-_][a-z0-9]+)*$").unwrap());

/// Highest accepted `server.log_level` (3 = ERROR)
const MAX_LOG_LEVEL: u8 = 3;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate the entire model configuration
    pub fn validate(&self, model: &Model) -> Result<(), ClimateError> {
        self.validate_model_name(&model.name)?;
        self.validate_database(model)?;
        self.validate_server(model)?;
        Ok(())
    }

    fn validate_model_name(&self, name: &str) -> Result<(), ClimateError> {
        if name.is_empty() {
            return Err(ClimateError::Validation(
                "Model name cannot be empty".to_string(),
            ));
        }

        if !NAME_PATTERN.is_match(name) {
            return Err(ClimateError::Validation(format!(
                "Invalid model name '{}': must be lower-kebab-case or lower_snake_case",
                name
            )));
        }

        Ok(())
    }

    fn validate_database(&self, model: &Model) -> Result<(), ClimateError> {
        let db = &model.database;

        if db.url.is_empty() {
            return Err(ClimateError::Validation(
                "Database URL cannot be empty".to_string(),
            ));
        }

        if db.has_env_placeholders() {
            return Err(ClimateError::Validation(format!(
                "Database URL still contains an unresolved placeholder: '{}'",
                db.url
            )));
        }

        if Connector::from_url(&db.url).is_none() {
            let schemes: Vec<&str> = Connector::all()
                .iter()
                .flat_map(|c| c.url_schemes().iter().copied())
                .collect();
            return Err(ClimateError::Validation(format!(
                "Unsupported database URL '{}' (expected {})",
                db.redacted_url(),
                schemes.join(", ")
            )));
        }

        if !db.connector.accepts_url(&db.url) {
            return Err(ClimateError::Validation(format!(
                "Database URL '{}' does not match connector '{}' (expected {})",
                db.redacted_url(),
                db.connector,
                db.connector.url_schemes().join(" or ")
            )));
        }

        Ok(())
    }

    fn validate_server(&self, model: &Model) -> Result<(), ClimateError> {
        let Some(server) = &model.server else {
            return Ok(());
        };

        if let Some(port) = &server.port {
            if port.parse::<u16>().is_err() {
                return Err(ClimateError::Validation(format!(
                    "Invalid server port '{}': must be an integer between 0 and 65535",
                    port
                )));
            }
        }

        if let Some(level) = server.log_level {
            if level > MAX_LOG_LEVEL {
                return Err(ClimateError::Validation(format!(
                    "Invalid log_level {}: must be 0 (DEBUG) to 3 (ERROR)",
                    level
                )));
            }
        }

        if let Some(pool) = &server.pool {
            if pool.max_connections() == 0 {
                return Err(ClimateError::Validation(
                    "pool.max_connections must be at least 1".to_string(),
                ));
            }
            if pool.min_connections() > pool.max_connections() {
                return Err(ClimateError::Validation(format!(
                    "pool.min_connections ({}) exceeds pool.max_connections ({})",
                    pool.min_connections(),
                    pool.max_connections()
                )));
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_api_core::{DatabaseConfig, PoolConfig, ServerConfig};

    fn model_with_server(server: ServerConfig) -> Model {
        let mut model = Model::default();
        model.server = Some(server);
        model
    }

    #[test]
    fn test_valid_default_model() {
        assert!(ConfigValidator::new().validate(&Model::default()).is_ok());
    }

    #[test]
    fn test_invalid_model_name() {
        let model = Model::new("Hawaii Climate");
        assert!(ConfigValidator::new().validate(&model).is_err());
    }

    #[test]
    fn test_empty_model_name() {
        let model = Model::new("");
        assert!(ConfigValidator::new().validate(&model).is_err());
    }

    #[test]
    fn test_connector_url_mismatch() {
        let model = Model::default().with_database(DatabaseConfig::new(
            Connector::Postgres,
            "sqlite://Resources/hawaii.sqlite",
        ));
        let err = ConfigValidator::new().validate(&model).unwrap_err();
        assert!(err.to_string().contains("does not match connector 'postgres'"));
    }

    #[test]
    fn test_unsupported_url_scheme() {
        let model = Model::default()
            .with_database(DatabaseConfig::from_url("mysql://root@localhost/hawaii"));
        let err = ConfigValidator::new().validate(&model).unwrap_err();
        assert!(err.to_string().contains("Unsupported database URL"), "{}", err);
    }

    #[test]
    fn test_unresolved_placeholder() {
        let model = Model::default().with_database(DatabaseConfig::new(
            Connector::Sqlite,
            "{{ env.CLIMATE_DB }}",
        ));
        assert!(ConfigValidator::new().validate(&model).is_err());
    }

    #[test]
    fn test_invalid_port() {
        let model = model_with_server(ServerConfig {
            port: Some("70000".to_string()),
            log_level: None,
            pool: None,
        });
        assert!(ConfigValidator::new().validate(&model).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let model = model_with_server(ServerConfig {
            port: None,
            log_level: Some(4),
            pool: None,
        });
        assert!(ConfigValidator::new().validate(&model).is_err());
    }

    #[test]
    fn test_invalid_pool_bounds() {
        let model = model_with_server(ServerConfig {
            port: None,
            log_level: None,
            pool: Some(PoolConfig {
                max_connections: Some(2),
                min_connections: Some(5),
                ..PoolConfig::default()
            }),
        });
        let err = ConfigValidator::new().validate(&model).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }
}
