//! Environment variable substitution for configuration files
//!
//! Placeholders look like `{{ env.DATABASE_URL }}`. A fallback can be given
//! after a pipe: `{{ env.PORT | 5000 }}`.

use climate_api_core::ClimateError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ENV_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*env\.([A-Za-z_][A-Za-z0-9_]*)\s*(?:\|\s*([^}]*?)\s*)?\}\}").unwrap()
});

/// Environment variable substitutor.
///
/// A variable that is unset and has no fallback is an error.
pub struct EnvSubstitutor;

impl EnvSubstitutor {
    pub fn new() -> Self {
        Self
    }

    /// Substitute environment variables in the given content
    pub fn substitute(&self, content: &str) -> Result<String, ClimateError> {
        // .env is optional
        let _ = dotenvy::dotenv();

        let mut missing: Vec<String> = Vec::new();

        let result = ENV_PATTERN.replace_all(content, |cap: &Captures<'_>| {
            let var_name = &cap[1];
            match (std::env::var(var_name), cap.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(fallback)) => fallback.as_str().to_string(),
                (Err(_), None) => {
                    missing.push(var_name.to_string());
                    cap[0].to_string()
                }
            }
        });

        if !missing.is_empty() {
            return Err(ClimateError::EnvVarNotFound(missing.join(", ")));
        }

        Ok(result.into_owned())
    }
}

impl Default for EnvSubstitutor {
    fn default() -> Self {
        Self::new()
    }
}
