//! Streaming session orchestrator
//!
//! Drives one synthesize request over a persistent connection: validate,
//! optionally translate, segment once, then synthesize and emit each
//! segment strictly in order, finishing with a completion signal. One
//! failed segment is reported and skipped; it never aborts the rest of the
//! session. Sessions keep no state across requests on the same connection.
//!
//! Emission goes through an mpsc sender so the orchestrator is independent
//! of the socket: the WebSocket layer owns the writer task, and tests drive
//! sessions over a bare channel.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::core::audio::encode_wav;
use crate::core::language;
use crate::core::segmenter::segment;
use crate::core::translate::translate_if_needed;
use crate::state::AppState;

use super::messages::OutgoingMessage;

/// Which pipeline variant a connection is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Translate the input first, then stream synthesis of the translation.
    TranslateAndStream,
    /// Stream synthesis of the input as-is.
    StreamOnly,
}

/// Run one streaming synthesize request to completion.
///
/// Event order on the sender: optional `translation`, `stream_start`, then
/// per segment `audio_chunk` or a segment-scoped `error`, finally
/// `stream_complete`. An `error` with no `stream_start` before it means the
/// request was rejected up front. Send failures mean the client is gone;
/// the session winds down quietly and in-flight results are discarded.
pub async fn run_session(
    state: &AppState,
    mode: SessionMode,
    text: &str,
    language_name: &str,
    tx: &mpsc::Sender<OutgoingMessage>,
) {
    let session_id = Uuid::new_v4();

    if text.trim().is_empty() {
        warn!(session = %session_id, "rejecting synthesize request with no text");
        let _ = tx
            .send(OutgoingMessage::Error {
                message: "No text provided".to_string(),
            })
            .await;
        return;
    }

    let code = language::resolve(language_name);
    info!(
        session = %session_id,
        mode = ?mode,
        language = %code,
        "starting streaming session"
    );

    let text_to_speak = match mode {
        SessionMode::TranslateAndStream => {
            let translated = translate_if_needed(state.translator_ref(), text, code).await;
            if translated != text {
                let notify = tx
                    .send(OutgoingMessage::Translation {
                        original: text.to_string(),
                        translated: translated.clone(),
                    })
                    .await;
                if notify.is_err() {
                    return;
                }
            }
            translated
        }
        SessionMode::StreamOnly => text.to_string(),
    };

    let segments = segment(&text_to_speak, state.config.segmenter());

    if tx
        .send(OutgoingMessage::StreamStart {
            total_chunks: segments.len(),
        })
        .await
        .is_err()
    {
        return;
    }

    // Strictly sequential: segment i+1 is not synthesized before segment
    // i's audio unit has been emitted.
    for seg in &segments {
        let result = state
            .engine
            .synthesize(&seg.text, language_name, state.config.speaking_rate)
            .await;

        let event = match result {
            Ok(clip) => match encode_wav(&clip) {
                Ok(wav) => OutgoingMessage::AudioChunk {
                    chunk_index: seg.index,
                    audio: BASE64.encode(wav),
                    text_chunk: seg.text.clone(),
                },
                Err(e) => {
                    warn!(session = %session_id, chunk = seg.index, error = %e, "segment encoding failed");
                    OutgoingMessage::Error {
                        message: e.to_string(),
                    }
                }
            },
            Err(e) => {
                warn!(session = %session_id, chunk = seg.index, error = %e, "segment synthesis failed");
                OutgoingMessage::Error {
                    message: e.to_string(),
                }
            }
        };

        if tx.send(event).await.is_err() {
            debug!(session = %session_id, "client disconnected mid-stream, discarding remainder");
            return;
        }
    }

    let _ = tx.send(OutgoingMessage::StreamComplete {}).await;
    info!(session = %session_id, chunks = segments.len(), "streaming session complete");
}
