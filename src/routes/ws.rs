//! WebSocket route configuration
//!
//! Configures the two streaming endpoints. Both speak the same JSON message
//! protocol; they differ only in whether the request text is translated
//! before synthesis.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::ws::{ws_stream_handler, ws_translate_handler};
use crate::state::AppState;
use std::sync::Arc;

/// Create the WebSocket router
///
/// # Endpoints
///
/// `GET /ws/translate` - translate the request text, then stream synthesis
/// `GET /ws/stream` - stream synthesis of the request text as-is
///
/// # Protocol
///
/// After upgrade, clients send:
///
/// ```json
/// {"type": "synthesize", "text": "Hello there. How are you?", "language": "hindi"}
/// ```
///
/// Server responds with, in order: an optional `translation` event, a
/// `stream_start` carrying the total chunk count, one `audio_chunk` (base64
/// WAV) or segment-scoped `error` per text segment, and a final
/// `stream_complete`.
pub fn create_ws_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ws/translate", get(ws_translate_handler))
        .route("/ws/stream", get(ws_stream_handler))
        .layer(TraceLayer::new_for_http())
}
