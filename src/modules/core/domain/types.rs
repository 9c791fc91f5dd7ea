//! `server:` section of the config file: HTTP port, log level and the
//! store's connection pool

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default HTTP port
pub(crate) const DEFAULT_PORT: u16 = 5000;

const DEFAULT_LOG_LEVEL: u8 = 1;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Pool sizing for the observation store.
///
/// Every request holds one connection for the length of its single query, so
/// `max_connections` caps how many climate requests run against the store at
/// once. Unset keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Concurrent sessions (default: 10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,

    /// Connections kept open while idle (default: 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_connections: Option<u32>,

    /// Seconds a request waits for a free session before failing with a 500
    /// (default: 30)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquire_timeout_secs: Option<u64>,

    /// Seconds before an unused connection is closed (default: 600)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout_secs: Option<u64>,

    /// Seconds before any connection is recycled (default: 1800)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lifetime_secs: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: Some(DEFAULT_MAX_CONNECTIONS),
            min_connections: Some(DEFAULT_MIN_CONNECTIONS),
            acquire_timeout_secs: Some(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            idle_timeout_secs: Some(DEFAULT_IDLE_TIMEOUT_SECS),
            max_lifetime_secs: Some(DEFAULT_MAX_LIFETIME_SECS),
        }
    }
}

impl PoolConfig {
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn min_connections(&self) -> u32 {
        self.min_connections.unwrap_or(DEFAULT_MIN_CONNECTIONS)
    }

    pub fn acquire_timeout(&self) -> Duration {
        secs(self.acquire_timeout_secs, DEFAULT_ACQUIRE_TIMEOUT_SECS)
    }

    pub fn idle_timeout(&self) -> Duration {
        secs(self.idle_timeout_secs, DEFAULT_IDLE_TIMEOUT_SECS)
    }

    pub fn max_lifetime(&self) -> Duration {
        secs(self.max_lifetime_secs, DEFAULT_MAX_LIFETIME_SECS)
    }
}

fn secs(value: Option<u64>, default: u64) -> Duration {
    Duration::from_secs(value.unwrap_or(default))
}

/// The `server:` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port, kept as text so `{{ env.PORT }}` can fill it (default: 5000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    /// 0=DEBUG, 1=INFO, 2=WARN, 3=ERROR; `RUST_LOG` takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: Some(DEFAULT_PORT.to_string()),
            log_level: Some(DEFAULT_LOG_LEVEL),
            pool: Some(PoolConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, Some("5000".to_string()));
        assert_eq!(config.log_level, Some(1));
    }

    #[test]
    fn test_server_config_serde() {
        let config = ServerConfig {
            port: Some("3000".to_string()),
            log_level: Some(2),
            pool: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"port\":\"3000\""));
        assert!(json.contains("\"log_level\":2"));

        let parsed: ServerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_pool_config_default() {
        let config = PoolConfig::default();
        assert_eq!(config.max_connections(), 10);
        assert_eq!(config.min_connections(), 1);
        assert_eq!(config.acquire_timeout().as_secs(), 30);
        assert_eq!(config.idle_timeout().as_secs(), 600);
        assert_eq!(config.max_lifetime().as_secs(), 1800);
    }

    #[test]
    fn test_pool_config_partial_fallbacks() {
        let config: PoolConfig = serde_json::from_str(r#"{"max_connections": 4}"#).unwrap();
        assert_eq!(config.max_connections(), 4);
        assert_eq!(config.min_connections(), 1);
    }
}
