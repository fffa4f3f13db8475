//! Error types for payflow-config

use serde::Serialize;
use thiserror::Error;

/// Stable identifier of a configuration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    Unreadable,
    InvalidYaml,
    InvalidValue,
}

impl ConfigErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ConfigErrorCode::Unreadable => "UNREADABLE",
            ConfigErrorCode::InvalidYaml => "INVALID_YAML",
            ConfigErrorCode::InvalidValue => "INVALID_VALUE",
        }
    }
}

/// What the operator sees when startup aborts
#[derive(Debug, Clone, Serialize)]
pub struct ConfigErrorDetails {
    pub code: ConfigErrorCode,
    pub message: String,
    /// Dotted path of the offending setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl std::fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)?;
        if let Some(field) = &self.field {
            write!(f, " (setting `{}`)", field)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read config file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `origin` is the file path, or `<inline>` for text parsed directly
    #[error("Invalid YAML in {origin}: {source}")]
    InvalidYaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::Unreadable { .. } => ConfigErrorCode::Unreadable,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
        }
    }

    pub fn to_details(&self) -> ConfigErrorDetails {
        let (field, hint) = match self {
            ConfigError::FileNotFound { .. } => (
                None,
                Some("Pass --config <path>, or run --print-default-config > config.yaml"),
            ),
            ConfigError::Unreadable { .. } => (None, Some("Check the file's permissions")),
            ConfigError::InvalidYaml { .. } => (None, Some("Compare against --print-default-config")),
            ConfigError::InvalidValue { field, .. } => (Some(field.clone()), None),
        };
        ConfigErrorDetails {
            code: self.code(),
            message: self.to_string(),
            field,
            hint: hint.map(str::to_string),
        }
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
