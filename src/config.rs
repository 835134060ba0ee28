use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Loaded from YAML. Every field has a default, so a missing file yields a
// self-contained service (in-memory store and inventory).
//
// ============================================================================

pub const CONFIG_PATH_ENV: &str = "ORDER_SERVICE_CONFIG";
pub const PORT_ENV: &str = "ORDER_SERVICE_PORT";
pub const DEFAULT_CONFIG_PATH: &str = "config/order-service.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default tracing filter, used when RUST_LOG is unset
    pub log_filter: String,
    pub server: ServerConfig,
    /// PostgreSQL URL for the order store; in-memory store when absent
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Base URL of the inventory service; in-memory inventory when absent
    pub inventory_url: Option<String>,
    /// Seed stock levels for the in-memory inventory
    pub inventory: HashMap<String, i32>,
    /// Overrides for localized messages, keyed by message key
    pub messages: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info,order_service=debug".to_string(),
            server: ServerConfig::default(),
            database_url: None,
            database_max_connections: 5,
            inventory_url: None,
            inventory: HashMap::new(),
            messages: HashMap::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
        }
    }
}

impl AppConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Invalid configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Load from `ORDER_SERVICE_CONFIG` (or the default path) if the file
    /// exists, then apply `ORDER_SERVICE_PORT`.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(port) = std::env::var(PORT_ENV) {
            config.server.port = port
                .parse()
                .with_context(|| format!("{} must be a port number, got {:?}", PORT_ENV, port))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_standalone() {
        let config = AppConfig::default();
        assert!(config.database_url.is_none());
        assert!(config.inventory_url.is_none());
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            r#"
server:
  port: 9000
inventory:
  iphone_15: 100
messages:
  exception.general-content: "Something went wrong"
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.inventory.get("iphone_15"), Some(&100));
        assert_eq!(
            config.messages.get("exception.general-content").map(String::as_str),
            Some("Something went wrong")
        );
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(AppConfig::from_yaml("server: [1, 2").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::from_file("/nonexistent/order-service.yaml").is_err());
    }
}
