//! Route handlers.
//!
//! - [`health`]: service liveness
//! - [`companies`]: company queries, system health and comparison
//! - [`stream`]: server-sent live score feed

pub mod companies;
pub mod health;
pub mod stream;

use axum::http::Uri;
use creditlens_core::Ticker;

use crate::error::{ApiError, ApiResult};

/// Path tickers must be 1 to 10 ASCII letters before they reach the engine.
pub(crate) fn path_ticker(raw: &str) -> ApiResult<Ticker> {
    Ticker::parse(raw).map_err(ApiError::from)
}

/// Fallback for every unrouted path.
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "unrouted request");
    ApiError::NotFound("API endpoint not found".to_owned())
}
