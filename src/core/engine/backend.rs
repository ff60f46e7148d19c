//! Synthesis backend seams
//!
//! The neural synthesis engine is an external capability: given text and a
//! language it was loaded for, it returns a raw f32 waveform. This module
//! defines the trait boundary the rest of the server programs against, so
//! concrete engines (local placeholder, remote inference worker, future
//! in-process models) can be swapped without touching the pipeline or the
//! cache.

use async_trait::async_trait;

use crate::core::language::LanguageCode;
use crate::errors::{InferenceError, LoadError};

/// Raw floating-point audio as produced by a backend.
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// A loaded synthesis engine for one language.
///
/// Implementations must be `Send + Sync`: handles are shared across
/// concurrent sessions behind an `Arc` once the cache hands them out.
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// Synthesize `text` into a raw waveform.
    ///
    /// `speed` is a length-scale multiplier: values above 1.0 slow the
    /// speech down (and typically increase clarity).
    ///
    /// CPU-bound implementations must offload inference to a blocking
    /// worker (`tokio::task::spawn_blocking`) so the async runtime's I/O
    /// dispatch is never stalled by an in-flight synthesis call.
    async fn infer(&self, text: &str, speed: f32) -> Result<Waveform, InferenceError>;

    /// Output sample rate of this engine in Hz.
    fn sample_rate(&self) -> u32;
}

/// A loaded backend tagged with the language it serves.
///
/// Created by a [`BackendLoader`] on cache miss, owned by the backend cache,
/// and handed to the pipeline behind an `Arc`. An evicted handle stays alive
/// until the last in-flight segment using it completes.
pub struct BackendHandle {
    code: LanguageCode,
    backend: Box<dyn SynthesisBackend>,
}

impl BackendHandle {
    pub fn new(code: LanguageCode, backend: Box<dyn SynthesisBackend>) -> Self {
        Self { code, backend }
    }

    /// Language this backend was loaded for.
    pub fn code(&self) -> LanguageCode {
        self.code
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.backend.sample_rate()
    }

    /// Run inference on the wrapped engine.
    pub async fn infer(&self, text: &str, speed: f32) -> Result<Waveform, InferenceError> {
        self.backend.infer(text, speed).await
    }
}

impl std::fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendHandle")
            .field("code", &self.code)
            .field("sample_rate", &self.sample_rate())
            .finish()
    }
}

/// Loads synthesis backends on demand, one per language code.
///
/// Loading is expensive (model weights, device transfer, remote probes);
/// the backend cache bounds how many loaded engines exist at once and calls
/// this exactly once per resident language.
#[async_trait]
pub trait BackendLoader: Send + Sync {
    async fn load(&self, code: LanguageCode) -> Result<BackendHandle, LoadError>;
}
