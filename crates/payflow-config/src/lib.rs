//! Configuration management for payflow-web
//!
//! This module handles loading, validation, and environment overrides of
//! the payflow-web configuration, and resolves which base URLs the backend
//! services are reached through (see [`routing`]).

pub mod error;
pub mod routing;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigResult};
pub use routing::{RoutingMode, ServiceRoutes};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Backend API settings
///
/// `use_direct` and `use_gateway` are mutually exclusive in effect;
/// direct wins when both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Call each service on its own URL
    #[serde(default)]
    pub use_direct: bool,
    /// Call both services through the API gateway
    #[serde(default)]
    pub use_gateway: bool,
    /// Gateway base URL (gateway mode)
    #[serde(default)]
    pub gateway_url: Option<String>,
    /// Account service base URL (direct mode)
    #[serde(default)]
    pub account_service_url: Option<String>,
    /// Transaction service base URL (direct mode)
    #[serde(default)]
    pub transaction_service_url: Option<String>,
    /// Public origin that relative API paths resolve against
    #[serde(default = "default_origin")]
    pub origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            use_direct: false,
            use_gateway: false,
            gateway_url: None,
            account_service_url: None,
            transaction_service_url: None,
            origin: default_origin(),
        }
    }
}

fn default_origin() -> String {
    "http://localhost".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// View settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    /// Number of transactions shown on the dashboard
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self { recent_transactions: default_recent_transactions() }
    }
}

fn default_recent_transactions() -> usize {
    5
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency symbol shown next to amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_symbol() -> String {
    "₹".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

fn default_decimal_sep() -> String {
    ".".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Before,
    After,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// View settings
    #[serde(default)]
    pub views: ViewsConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Environment variables recognised by [`Config::apply_env`]
pub const ENV_USE_DIRECT: &str = "PAYFLOW_USE_DIRECT";
pub const ENV_USE_GATEWAY: &str = "PAYFLOW_USE_GATEWAY";
pub const ENV_GATEWAY_URL: &str = "PAYFLOW_GATEWAY_URL";
pub const ENV_ACCOUNT_API_URL: &str = "PAYFLOW_ACCOUNT_API_URL";
pub const ENV_TRANSACTION_API_URL: &str = "PAYFLOW_TRANSACTION_API_URL";
pub const ENV_ORIGIN: &str = "PAYFLOW_ORIGIN";

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound { path: display.clone() },
            _ => ConfigError::Unreadable { path: display.clone(), source },
        })?;

        let config = Self::parse(&content, &display)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::InvalidYaml {
            origin: origin.to_string(),
            source,
        })
    }

    /// Overlay `PAYFLOW_*` environment values.
    ///
    /// Flags only turn on for the literal `true`. URL values are taken
    /// as-is; the routing resolver discards malformed ones.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_USE_DIRECT) {
            self.api.use_direct = routing::parse_flag(Some(&v));
        }
        if let Some(v) = lookup(ENV_USE_GATEWAY) {
            self.api.use_gateway = routing::parse_flag(Some(&v));
        }
        if let Some(v) = lookup(ENV_GATEWAY_URL) {
            self.api.gateway_url = Some(v);
        }
        if let Some(v) = lookup(ENV_ACCOUNT_API_URL) {
            self.api.account_service_url = Some(v);
        }
        if let Some(v) = lookup(ENV_TRANSACTION_API_URL) {
            self.api.transaction_service_url = Some(v);
        }
        if let Some(v) = lookup(ENV_ORIGIN) {
            if !v.trim().is_empty() {
                self.api.origin = v.trim().trim_end_matches('/').to_string();
            }
        }
    }

    /// Overlay the process environment
    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.views.recent_transactions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "views.recent_transactions".to_string(),
                reason: "At least one recent transaction must be shown".to_string(),
            });
        }

        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Unknown log level: {}", self.logging.level),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Resolve the backend routing for this configuration
    pub fn routes(&self) -> ServiceRoutes {
        ServiceRoutes::resolve(&self.api)
    }

    /// Address the web server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert!(!config.api.use_direct);
        assert!(!config.api.use_gateway);
        assert_eq!(config.api.origin, "http://localhost");
        assert_eq!(config.views.recent_transactions, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.routes().mode, RoutingMode::Relative);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("api:\n  use_gateway: true\n").unwrap();
        assert!(config.api.use_gateway);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.routes().account_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { ref origin, .. } if origin == "<inline>"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_USE_DIRECT, "true"),
            (ENV_ACCOUNT_API_URL, "http://accounts:8081"),
            (ENV_ORIGIN, "https://payflow.example/"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert!(config.api.use_direct);
        assert!(!config.api.use_gateway);
        assert_eq!(config.api.account_service_url.as_deref(), Some("http://accounts:8081"));
        assert_eq!(config.api.origin, "https://payflow.example");
        assert_eq!(config.routes().account_base_url, "http://accounts:8081");
    }

    #[test]
    fn test_apply_env_malformed_flag_is_false() {
        let mut config = Config::default();
        config.api.use_gateway = true;
        config.apply_env(|key| (key == ENV_USE_GATEWAY).then(|| "enabled".to_string()));
        assert!(!config.api.use_gateway);
        assert_eq!(config.routes().mode, RoutingMode::Relative);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/payflow/config.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_unreadable_reports_path() {
        let dir = std::env::temp_dir();
        let err = Config::load(&dir).unwrap_err();
        match &err {
            ConfigError::Unreadable { path, .. } => assert_eq!(path, &dir.display().to_string()),
            other => panic!("expected Unreadable, got {:?}", other),
        }
        assert!(std::error::Error::source(&err).is_some());
    }
}
