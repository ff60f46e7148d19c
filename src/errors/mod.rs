//! Error types
//!
//! Domain errors are small `thiserror` enums owned by the layer that raises
//! them; `app_error` maps whatever reaches an HTTP handler onto a response.

pub mod app_error;

pub use app_error::{AppError, AppResult};

use thiserror::Error;

/// A synthesis backend failed to load for a language code.
///
/// Surfaced to the caller as-is; the backend cache is left untouched by a
/// failed load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no synthesis model available for language '{0}'")]
    ModelUnavailable(String),

    #[error("backend load failed for language '{code}': {reason}")]
    Backend { code: String, reason: String },

    #[error("inference worker request failed: {0}")]
    Transport(String),
}

/// A loaded backend failed to synthesize a piece of text.
///
/// Segment-scoped in streaming mode, fatal to the request in single-shot
/// mode.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("synthesis failed: {0}")]
    Backend(String),

    #[error("inference worker request failed: {0}")]
    Transport(String),

    #[error("inference task was cancelled")]
    Cancelled,
}

/// Any failure along the synthesis pipeline.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// The translation backend failed.
///
/// Always recovered locally: callers fall back to the untranslated text and
/// never surface this upward.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation backend is not configured")]
    NotConfigured,

    #[error("no translation mapping for language '{0}'")]
    UnmappedLanguage(String),

    #[error("translation request failed: {0}")]
    Transport(String),

    #[error("translation backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Audio container encoding failed.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("WAV encoding failed: {0}")]
    Encode(String),
}

/// Configuration could not be loaded or validated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse config file '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
