//! Single-shot text-to-speech REST API
//!
//! Runs translation and one whole-text pass through the synthesis pipeline,
//! returning a complete WAV payload. Without segmentation there is no
//! partial-failure isolation: any synthesis failure fails the whole request
//! with a server-fault status.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

use crate::core::audio::encode_wav;
use crate::core::language;
use crate::core::translate::translate_if_needed;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Speed used for single-shot requests; streaming sessions use the
/// configured speaking rate instead.
const SINGLE_SHOT_SPEED: f32 = 1.0;

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "english".to_string()
}

/// `POST /synthesize`: translate, synthesize the whole text once, and
/// return one WAV file.
pub async fn synthesize_handler(
    State(state): State<Arc<AppState>>,
    axum::Json(req): axum::Json<SynthesizeRequest>,
) -> AppResult<Response> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("No text provided".to_string()));
    }

    let code = language::resolve(&req.language);
    info!(language = %code, "single-shot synthesis request");

    let text = translate_if_needed(state.translator_ref(), &req.text, code).await;

    let clip = state
        .engine
        .synthesize(&text, &req.language, SINGLE_SHOT_SPEED)
        .await?;
    let wav = encode_wav(&clip)?;

    Ok(([(header::CONTENT_TYPE, "audio/wav")], wav).into_response())
}
