//! HTTP error mapping.
//!
//! Every failure is answered as `{"success": false, "error": "<message>"}`
//! with the status code declared by its variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use creditlens_core::{CoreError, ValidationError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown ticker or route (404).
    #[error("{0}")]
    NotFound(String),

    /// Malformed path or query input (400).
    #[error("{0}")]
    BadRequest(String),

    /// Per-client request budget exhausted (429).
    #[error("Too many requests from this IP, please try again later.")]
    RateLimited,

    /// Unexpected engine failure (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            CoreError::Validation(inner) => Self::BadRequest(inner.to_string()),
            other => {
                error!(code = other.code(), error = %other, "engine failure");
                Self::Internal("Internal server error".to_owned())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Startup failures of the `creditlens` binary, mapped to process exit codes.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid log filter: {0}")]
    LogFilter(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(CoreError::Validation(_)) => 2,
            Self::Core(_) => 3,
            Self::LogFilter(_) => 2,
            Self::Bind { .. } => 4,
            Self::Io(_) => 10,
        }
    }
}
