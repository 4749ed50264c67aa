use axum::response::{IntoResponse, Response};
use axum::Json;
use creditlens_core::UtcDateTime;
use serde::Serialize;

/// Success envelope wrapping every JSON payload: `{success, data, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: UtcDateTime,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: UtcDateTime::now(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
