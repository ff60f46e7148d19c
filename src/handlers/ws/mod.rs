//! WebSocket streaming endpoints
//!
//! Two routes share one connection loop: `/ws/translate` translates the
//! request text before synthesis, `/ws/stream` synthesizes it as-is. Each
//! connection gets a dedicated writer task fed through an mpsc channel so
//! session code never touches the socket directly. Requests on the same
//! connection run strictly one at a time.

pub mod messages;
pub mod session;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::state::AppState;

use messages::{IncomingMessage, OutgoingMessage};
use session::{SessionMode, run_session};

/// Outgoing event buffer per connection. Audio chunks are produced one at a
/// time, so a modest buffer only has to absorb a slow reader.
const CHANNEL_BUFFER_SIZE: usize = 64;

/// `GET /ws/translate` - translate-then-stream WebSocket endpoint.
pub async fn ws_translate_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    info!("translate WebSocket connection upgrade requested");
    ws.on_upgrade(move |socket| handle_socket(socket, state, SessionMode::TranslateAndStream))
}

/// `GET /ws/stream` - direct streaming WebSocket endpoint.
pub async fn ws_stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    info!("stream WebSocket connection upgrade requested");
    ws.on_upgrade(move |socket| handle_socket(socket, state, SessionMode::StreamOnly))
}

/// Drive one WebSocket connection until the client disconnects.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, mode: SessionMode) {
    debug!(?mode, "WebSocket connection established");

    let (mut sender, mut receiver) = socket.split();
    let (event_tx, mut event_rx) = mpsc::channel::<OutgoingMessage>(CHANNEL_BUFFER_SIZE);

    // Writer task: serialize outgoing events to text frames. Exits when the
    // last sender is dropped or the socket write fails.
    let writer_task = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to serialize outgoing event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    let _ = event_tx
        .send(OutgoingMessage::Status {
            msg: "connected".to_string(),
        })
        .await;

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let incoming: IncomingMessage = match serde_json::from_str(&text) {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!("unparseable client message: {}", e);
                        let _ = event_tx
                            .send(OutgoingMessage::Error {
                                message: format!("Invalid message format: {e}"),
                            })
                            .await;
                        continue;
                    }
                };

                match incoming {
                    IncomingMessage::Synthesize { text, language } => {
                        // Awaited inline: a second request on the same
                        // connection waits for the current session to finish.
                        run_session(&state, mode, &text, &language, &event_tx).await;
                    }
                    IncomingMessage::Ping => {
                        let _ = event_tx.send(OutgoingMessage::Pong).await;
                    }
                }
            }
            Ok(Message::Close(_)) => {
                debug!("client closed WebSocket connection");
                break;
            }
            Ok(_) => {
                // Binary / ping / pong frames carry nothing for us.
            }
            Err(e) => {
                warn!("WebSocket read error: {}", e);
                break;
            }
        }
    }

    // Dropping the last sender lets the writer drain and close cleanly.
    drop(event_tx);
    let _ = writer_task.await;

    debug!(?mode, "WebSocket connection terminated");
}
