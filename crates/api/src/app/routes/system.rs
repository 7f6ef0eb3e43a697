use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{
        IntoResponse,
        sse::{Event as SseEvent, KeepAlive, Sse},
    },
};
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

use crate::app::services::AppServices;

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "stockbeads",
        "status": "running",
    }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /stream
///
/// Live notifications as Server-Sent Events. Delivery is at-most-once: a
/// listener that lags past the channel capacity silently skips the missed
/// messages, and there is no replay for late subscribers.
pub async fn stream(
    Extension(services): Extension<Arc<AppServices>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.notifier.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(envelope) => Some(Ok(SseEvent::default()
            .id(envelope.event_id.to_string())
            .event(envelope.notification.kind())
            .data(envelope.notification.data().to_string()))),
        // Lagged receiver; skip and keep streaming.
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
