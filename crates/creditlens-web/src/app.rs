//! Axum application builder.
//!
//! # Routes
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /api/health` | [`health::health`] |
//! | `GET /api/companies` | [`companies::list_companies`] |
//! | `GET /api/company/:ticker` | [`companies::get_company`] |
//! | `GET /api/company/:ticker/score` | [`companies::get_score`] |
//! | `GET /api/company/:ticker/drivers` | [`companies::get_drivers`] |
//! | `GET /api/company/:ticker/events` | [`companies::get_events`] |
//! | `GET /api/company/:ticker/history` | [`companies::get_history`] |
//! | `GET /api/system/health` | [`companies::get_system_health`] |
//! | `GET /api/compare` | [`companies::compare`] |
//! | `GET /api/stream/:ticker` | [`stream::stream_scores`] |
//!
//! Anything else falls through to a JSON 404.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::rate_limit::{ip_rate_limiter, limit_by_ip};
use crate::routes::{self, companies, health, stream};
use crate::state::AppState;

/// Create the application with all routes and middleware.
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let limiter = ip_rate_limiter(config.rate_limit_window, config.rate_limit_max);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/companies", get(companies::list_companies))
        .route("/api/company/:ticker", get(companies::get_company))
        .route("/api/company/:ticker/score", get(companies::get_score))
        .route("/api/company/:ticker/drivers", get(companies::get_drivers))
        .route("/api/company/:ticker/events", get(companies::get_events))
        .route("/api/company/:ticker/history", get(companies::get_history))
        .route("/api/system/health", get(companies::get_system_health))
        .route("/api/compare", get(companies::compare))
        .route("/api/stream/:ticker", get(stream::stream_scores))
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(limiter, limit_by_ip))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}
