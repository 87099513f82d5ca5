//! Non-200 responses of the check endpoint
//!
//! Request-validation failures render as 400 with `status: "error"`;
//! failures of the service itself render as 500 with `status: "down"`.
//! Transport failures of the target are never errors here: they are
//! classified verdicts delivered with 200.

use crate::core::status::{ProbeError, UrlError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const MISSING_URL_MESSAGE: &str = "No URL provided. Please include a \"url\" query parameter.";

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("{}", MISSING_URL_MESSAGE)]
    MissingAddress,
    #[error("Invalid URL format: {input}. Please provide a valid web address.")]
    InvalidAddress { input: String, detail: String },
    #[error("Invalid query string: {0}")]
    BadQuery(String),
    #[error("{message}")]
    Internal {
        code: String,
        message: String,
        checked_url: Option<String>,
    },
}

impl CheckError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckError::MissingAddress
            | CheckError::InvalidAddress { .. }
            | CheckError::BadQuery(_) => StatusCode::BAD_REQUEST,
            CheckError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build an internal error from a probe-layer setup failure
    pub fn from_probe(error: ProbeError, checked_url: &str) -> Self {
        CheckError::Internal {
            code: error.code().to_string(),
            message: format!("An unexpected error occurred: {}", error),
            checked_url: Some(checked_url.to_string()),
        }
    }

    /// Short reason used in logs
    pub fn code(&self) -> &str {
        match self {
            CheckError::MissingAddress => "MISSING_URL",
            CheckError::InvalidAddress { .. } => "INVALID_URL",
            CheckError::BadQuery(_) => "BAD_QUERY",
            CheckError::Internal { code, .. } => code,
        }
    }
}

impl From<UrlError> for CheckError {
    fn from(error: UrlError) -> Self {
        match error {
            UrlError::InvalidAddress { input, detail } => CheckError::InvalidAddress { input, detail },
        }
    }
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        let body = match self {
            CheckError::MissingAddress => json!({
                "status": "error",
                "message": message,
            }),
            CheckError::InvalidAddress { detail, .. } => json!({
                "status": "error",
                "message": message,
                "originalError": detail,
            }),
            CheckError::BadQuery(detail) => json!({
                "status": "error",
                "message": "Invalid query string. Please include a single \"url\" query parameter.",
                "originalError": detail,
            }),
            CheckError::Internal { code, checked_url, .. } => {
                let mut body = json!({
                    "status": "down",
                    "error": code,
                    "message": message,
                });
                if let Some(url) = checked_url {
                    body["checkedUrl"] = json!(url);
                }
                body
            }
        };

        (status, Json(body)).into_response()
    }
}
