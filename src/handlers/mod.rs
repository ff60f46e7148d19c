//! HTTP and WebSocket request handlers
//!
//! - `api` - Health check and language listing endpoints
//! - `speak` - Single-shot text-to-speech REST API
//! - `ws` - Streaming synthesis over WebSocket

pub mod api;
pub mod speak;
pub mod ws;

// Re-export commonly used handlers for convenient access
pub use speak::synthesize_handler;
pub use ws::{ws_stream_handler, ws_translate_handler};
