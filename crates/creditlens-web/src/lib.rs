//! # CreditLens Web
//!
//! HTTP and server-sent events surface over [`creditlens_core::QueryFacade`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`app`] | Router construction and middleware stack |
//! | [`config`] | Bind address, rate limit and CORS settings |
//! | [`envelope`] | `{success, data, timestamp}` response wrapper |
//! | [`error`] | HTTP error mapping |
//! | [`rate_limit`] | Per-IP request budget |
//! | [`routes`] | Endpoint handlers |
//! | [`state`] | Shared handler state |

pub mod app;
pub mod config;
pub mod envelope;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use config::ServerConfig;
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult, ServerError};
pub use state::AppState;
