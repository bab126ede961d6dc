//! Per-connection `WebSocket` translation session.

use std::fmt;
use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use metrics::{counter, gauge};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::events::{SessionEvent, events_for_message};
use crate::metrics::{
    TRANSLATION_URLS_TOTAL, WS_CONNECTIONS_ACTIVE, WS_CONNECTIONS_TOTAL, WS_DISCONNECTIONS_TOTAL,
    WS_MESSAGES_TOTAL,
};
use crate::server::AppState;

/// `GET /ws/translate`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let client_id = format!("client_{}", Uuid::now_v7());
    ws.max_message_size(state.max_message_size)
        .on_upgrade(move |socket| run_ws_session(socket, client_id, state))
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CloseReason {
    ClientClosed,
    ReadError,
    SendFailed,
    ServerShutdown,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClientClosed => "client closed",
            Self::ReadError => "read error",
            Self::SendFailed => "send failed",
            Self::ServerShutdown => "server shutdown",
        };
        f.write_str(s)
    }
}

/// Keeps the live connection count in step with the session lifetime.
struct ConnectionGuard {
    state: AppState,
}

impl ConnectionGuard {
    fn register(state: &AppState) -> Self {
        let active = state.connections.fetch_add(1, Ordering::Relaxed) + 1;
        counter!(WS_CONNECTIONS_TOTAL).increment(1);
        gauge!(WS_CONNECTIONS_ACTIVE).set(active as f64);
        Self {
            state: state.clone(),
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let active = self
            .state
            .connections
            .fetch_sub(1, Ordering::Relaxed)
            .saturating_sub(1);
        counter!(WS_DISCONNECTIONS_TOTAL).increment(1);
        gauge!(WS_CONNECTIONS_ACTIVE).set(active as f64);
    }
}

/// Run a session until the client leaves or the server shuts down.
///
/// Each text frame is answered with a transcript echo followed by one
/// video event per resolved URL. Frames are handled strictly in order.
#[instrument(skip_all, fields(client_id = %client_id))]
pub async fn run_ws_session(ws: WebSocket, client_id: String, state: AppState) {
    let _guard = ConnectionGuard::register(&state);
    info!("client connected");

    let (mut ws_tx, mut ws_rx) = ws.split();
    let shutdown = state.shutdown.token();

    let reason = loop {
        let frame = tokio::select! {
            () = shutdown.cancelled() => break CloseReason::ServerShutdown,
            frame = ws_rx.next() => frame,
        };

        let text = match frame {
            Some(Ok(Message::Text(text))) => text.as_str().to_owned(),
            Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => text,
                Err(_) => {
                    warn!(len = bytes.len(), "ignoring non-UTF-8 binary frame");
                    continue;
                }
            },
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | None => break CloseReason::ClientClosed,
            Some(Err(e)) => {
                debug!(error = %e, "websocket read failed");
                break CloseReason::ReadError;
            }
        };

        counter!(WS_MESSAGES_TOTAL).increment(1);
        let events = events_for_message(&state.dictionaries, &text);
        debug!(events = events.len(), "translated transcript");

        let mut failed = false;
        for event in events {
            let json = match event.to_json() {
                Ok(json) => json,
                Err(e) => {
                    warn!(error = %e, "failed to encode event");
                    continue;
                }
            };
            if matches!(event, SessionEvent::Video(_)) {
                counter!(TRANSLATION_URLS_TOTAL).increment(1);
            }
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                failed = true;
                break;
            }
        }
        if failed {
            break CloseReason::SendFailed;
        }
    };

    if reason == CloseReason::ServerShutdown {
        let _ = ws_tx.send(Message::Close(None)).await;
    }
    info!(%reason, "client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_reason_display() {
        assert_eq!(CloseReason::ClientClosed.to_string(), "client closed");
        assert_eq!(CloseReason::ServerShutdown.to_string(), "server shutdown");
        assert_eq!(CloseReason::SendFailed.to_string(), "send failed");
        assert_eq!(CloseReason::ReadError.to_string(), "read error");
    }

    #[test]
    fn guard_tracks_connection_count() {
        let state = AppState::seeded(signbridge_core::Dictionaries::default(), Some(0));
        {
            let _a = ConnectionGuard::register(&state);
            let _b = ConnectionGuard::register(&state);
            assert_eq!(state.connection_count(), 2);
        }
        assert_eq!(state.connection_count(), 0);
    }
}
