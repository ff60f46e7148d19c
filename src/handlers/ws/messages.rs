//! Streaming session wire messages
//!
//! JSON text frames, tagged by `type`. The server-to-client events mirror
//! the streaming protocol: optional `translation`, `stream_start`, then per
//! segment either `audio_chunk` or `error`, finally `stream_complete`. An
//! `error` before `stream_start` means the request itself was rejected.

use serde::{Deserialize, Serialize};

/// Messages a client can send on a streaming connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IncomingMessage {
    Synthesize {
        text: String,
        #[serde(default = "default_language")]
        language: String,
    },
    Ping,
}

fn default_language() -> String {
    "english".to_string()
}

/// Messages the server pushes to a streaming client.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutgoingMessage {
    /// Connection-level status notification.
    Status { msg: String },

    /// The input text was translated before synthesis.
    Translation { original: String, translated: String },

    /// Streaming is starting; `total_chunks` audio units will follow.
    StreamStart { total_chunks: usize },

    /// One synthesized segment: a complete WAV file, base64-encoded.
    AudioChunk {
        chunk_index: usize,
        audio: String,
        text_chunk: String,
    },

    /// Request- or segment-scoped failure.
    Error { message: String },

    /// All segments have been processed.
    StreamComplete {},

    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesize_message_parses() {
        let msg: IncomingMessage =
            serde_json::from_str(r#"{"type": "synthesize", "text": "hi", "language": "hindi"}"#)
                .unwrap();
        match msg {
            IncomingMessage::Synthesize { text, language } => {
                assert_eq!(text, "hi");
                assert_eq!(language, "hindi");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn synthesize_language_defaults_to_english() {
        let msg: IncomingMessage =
            serde_json::from_str(r#"{"type": "synthesize", "text": "hi"}"#).unwrap();
        match msg {
            IncomingMessage::Synthesize { language, .. } => assert_eq!(language, "english"),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn outgoing_messages_are_type_tagged() {
        let json = serde_json::to_value(OutgoingMessage::StreamStart { total_chunks: 3 }).unwrap();
        assert_eq!(json["type"], "stream_start");
        assert_eq!(json["total_chunks"], 3);

        let json = serde_json::to_value(OutgoingMessage::AudioChunk {
            chunk_index: 1,
            audio: "AAAA".to_string(),
            text_chunk: "Hello.".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "audio_chunk");
        assert_eq!(json["chunk_index"], 1);

        let json = serde_json::to_value(OutgoingMessage::StreamComplete {}).unwrap();
        assert_eq!(json["type"], "stream_complete");
    }

    #[test]
    fn unknown_incoming_type_is_rejected() {
        let result: Result<IncomingMessage, _> =
            serde_json::from_str(r#"{"type": "reboot_server"}"#);
        assert!(result.is_err());
    }
}
