//! Live score feed over server-sent events: `GET /api/stream/:ticker`.
//!
//! The feed session lives inside the response stream. When the client goes
//! away axum drops the stream, which drops the session and cancels its timer.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use creditlens_core::LiveSample;
use futures_util::stream::{self, Stream};
use tokio::sync::mpsc;

use super::path_ticker;
use crate::error::ApiResult;
use crate::state::AppState;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

pub async fn stream_scores(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
    let ticker = path_ticker(&ticker)?;
    let (tx, rx) = mpsc::unbounded_channel::<LiveSample>();

    let session = state.facade.open_stream(
        ticker.as_str(),
        move |sample: LiveSample| tx.send(sample).is_ok(),
        None,
    )?;

    let events = stream::unfold((rx, session), |(mut rx, session)| async move {
        let sample = rx.recv().await?;
        Some((Event::default().json_data(&sample), (rx, session)))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL)))
}
