//! Company endpoints.
//!
//! - `GET /api/companies` - summary list
//! - `GET /api/company/:ticker` - detail with a live score
//! - `GET /api/company/:ticker/score` - jittered score snapshot
//! - `GET /api/company/:ticker/drivers` - risk drivers and impact tally
//! - `GET /api/company/:ticker/events?startDate=&endDate=` - events, newest first
//! - `GET /api/company/:ticker/history?days=` - trailing series with analytics
//! - `GET /api/system/health` - aggregated data-source health
//! - `GET /api/compare?companies=AAPL,MSFT` - side-by-side comparison

use axum::extract::{Path, Query, State};
use creditlens_core::{
    CompanyDetail, CompanySummary, ComparisonReport, DriversReport, EventWindow, EventsReport,
    HistoryReport, ScoreSnapshot, SystemHealthReport, Ticker,
};
use serde::Deserialize;

use super::path_ticker;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `days` stays a string so non-numeric input falls back instead of rejecting.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    pub companies: Option<String>,
}

pub async fn list_companies(State(state): State<AppState>) -> Envelope<Vec<CompanySummary>> {
    Envelope::success(state.facade.list_companies())
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<Envelope<CompanyDetail>> {
    let ticker = path_ticker(&ticker)?;
    Ok(Envelope::success(state.facade.get_company(ticker.as_str())?))
}

pub async fn get_score(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<Envelope<ScoreSnapshot>> {
    let ticker = path_ticker(&ticker)?;
    Ok(Envelope::success(state.facade.get_score(ticker.as_str())?))
}

pub async fn get_drivers(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<Envelope<DriversReport>> {
    let ticker = path_ticker(&ticker)?;
    Ok(Envelope::success(state.facade.get_drivers(ticker.as_str())?))
}

pub async fn get_events(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Envelope<EventsReport>> {
    let ticker = path_ticker(&ticker)?;
    let window = EventWindow::from_params(query.start_date.as_deref(), query.end_date.as_deref());
    Ok(Envelope::success(
        state.facade.get_events(ticker.as_str(), &window)?,
    ))
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Envelope<HistoryReport>> {
    let ticker = path_ticker(&ticker)?;
    Ok(Envelope::success(
        state
            .facade
            .get_history(ticker.as_str(), query.days.as_deref())?,
    ))
}

pub async fn get_system_health(State(state): State<AppState>) -> Envelope<SystemHealthReport> {
    Envelope::success(state.facade.get_system_health())
}

pub async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> ApiResult<Envelope<ComparisonReport>> {
    let tickers = query
        .companies
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(Ticker::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if tickers.is_empty() {
        return Err(ApiError::BadRequest(
            "companies parameter required (comma-separated tickers)".to_owned(),
        ));
    }

    let keys: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();
    Ok(Envelope::success(state.facade.compare(&keys)?))
}
