//! Configuration parsing for the climate API
//!
//! This crate handles parsing of YAML configuration files, validation, and
//! environment variable substitution.

pub mod env;
pub mod validator;
pub mod yaml;

pub use validator::ConfigValidator;
pub use yaml::YamlParser;

use climate_api_core::{ClimateError, Model};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "climate.yaml";

/// Parse a configuration file from a path
pub fn parse_file(path: &str) -> Result<Model, ClimateError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ClimateError::Config(format!("Failed to read file '{}': {}", path, e)))?;

    parse_string(&content)
}

/// Parse a configuration from a string
pub fn parse_string(content: &str) -> Result<Model, ClimateError> {
    let model = YamlParser::parse(content)?;

    let validator = ConfigValidator::new();
    validator.validate(&model)?;

    Ok(model)
}

/// Load configuration, falling back to built-in defaults when `path` does
/// not exist and `required` is false.
pub fn load(path: &str, required: bool) -> Result<Model, ClimateError> {
    if !required && !Path::new(path).exists() {
        return Ok(Model::default());
    }
    parse_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple_config() {
        let yaml = r#"
name: hawaii-climate
database:
  connector: sqlite
  url: "sqlite://Resources/hawaii.sqlite"
"#;
        let model = parse_string(yaml).unwrap();
        assert_eq!(model.name, "hawaii-climate");
        assert_eq!(model.port(), 5000);
    }

    #[test]
    fn test_parse_string_rejects_invalid() {
        let yaml = r#"
name: hawaii-climate
database:
  connector: postgres
  url: "sqlite://Resources/hawaii.sqlite"
"#;
        assert!(parse_string(yaml).is_err());
    }

    #[test]
    fn test_load_missing_optional_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climate.yaml");
        let model = load(path.to_str().unwrap(), false).unwrap();
        assert_eq!(model, Model::default());
    }

    #[test]
    fn test_load_missing_required_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        let err = load(path.to_str().unwrap(), true).unwrap_err();
        assert!(matches!(err, ClimateError::Config(_)));
    }

    #[test]
    fn test_load_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: island-api\nserver:\n  port: 8000").unwrap();
        let model = load(file.path().to_str().unwrap(), false).unwrap();
        assert_eq!(model.name, "island-api");
        assert_eq!(model.port(), 8000);
    }
}
