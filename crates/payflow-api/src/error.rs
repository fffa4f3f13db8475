//! Error types for payflow-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use payflow_core::ClientError;
use thiserror::Error;

/// Failure of a JSON endpoint
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("{fallback}: {source}")]
    Upstream {
        /// Message shown when the service sent none
        fallback: &'static str,
        source: ClientError,
    },
}

impl ApiError {
    pub fn upstream(fallback: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| ApiError::Upstream { fallback, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { source, .. } => match source.status() {
                Some(404) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::BadRequest { message } => serde_json::json!({
                "code": "BAD_REQUEST",
                "message": message,
            }),
            ApiError::Upstream { fallback, source } => {
                log::warn!("{}", self);
                serde_json::to_value(source.to_details(fallback)).unwrap_or_default()
            }
        };
        (status, Json(body)).into_response()
    }
}
