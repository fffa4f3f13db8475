//! Error types for payflow-core
//!
//! Calls to the backend services fail in one of three ways: the request
//! never completed (transport), the service answered with a 4xx/5xx status,
//! or a 2xx body could not be decoded. None of them is fatal; the views
//! turn them into an operator-facing message with [`ClientError::operator_message`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Network unreachable, connection refused, timeout
    TransportError,
    /// Service answered with an error status
    HttpError,
    /// Response body did not match the expected shape
    DecodeError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::TransportError => write!(f, "TRANSPORT_ERROR"),
            ErrorCode::HttpError => write!(f, "HTTP_ERROR"),
            ErrorCode::DecodeError => write!(f, "DECODE_ERROR"),
        }
    }
}

/// Detailed error information for JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Operator-facing message
    pub message: String,
    /// Upstream HTTP status, if one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Error returned by the service clients
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered HTTP {status}")]
    Http {
        url: String,
        status: u16,
        /// The body's `message` field, when present
        message: Option<String>,
    },

    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ClientError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Transport { .. } => ErrorCode::TransportError,
            ClientError::Http { .. } => ErrorCode::HttpError,
            ClientError::Decode { .. } => ErrorCode::DecodeError,
        }
    }

    /// Upstream HTTP status, if the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message shown to the operator: the service's own message verbatim
    /// when it sent one, otherwise `fallback`.
    pub fn operator_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Http { message: Some(message), .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self, fallback: &str) -> ErrorDetails {
        ErrorDetails {
            code: self.code(),
            message: self.operator_message(fallback),
            status: self.status(),
        }
    }
}

/// Pull a non-empty `message` string out of an error body
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
