use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;

use crate::state::AppState;

/// GET /api/events — SSE stream of `update` events, one per dashboard
/// rewrite. The event data is the new `最終更新` value so clients can skip
/// refetching when it has not moved. Lagged receivers just miss events.
pub async fn sse_events(State(app): State<AppState>) -> impl axum::response::IntoResponse {
    let rx = app.event_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| {
        let changed = msg.ok()?;
        Some(Ok::<Event, Infallible>(
            Event::default().event("update").data(changed.last_updated),
        ))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
