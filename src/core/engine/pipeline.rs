//! Synthesis pipeline
//!
//! Composes one synthesize call end to end: resolve the language name,
//! normalize spoken math for the native language, acquire a backend through
//! the bounded cache, run inference, and quantize the waveform to 16-bit
//! PCM. The resolved backend handle flows through the call chain explicitly;
//! there is no "current backend" anywhere.

use std::sync::Arc;

use tracing::{info, warn};

use crate::core::audio::{AudioClip, quantize_waveform};
use crate::core::language::{self, LanguageCode};
use crate::core::normalize::Normalizer;
use crate::errors::SynthesisError;

use super::backend::BackendLoader;
use super::cache::BackendCache;

/// Truncate text for log output.
fn excerpt(text: &str) -> String {
    let mut s: String = text.chars().take(24).collect();
    if s.len() < text.len() {
        s.push_str("...");
    }
    s
}

/// Shared synthesis engine: one per server, used concurrently by every
/// session. The backend cache inside is the sole serialization point.
pub struct SynthesisEngine {
    cache: BackendCache,
    normalizer: Normalizer,
}

impl SynthesisEngine {
    pub fn new(loader: Arc<dyn BackendLoader>, capacity: usize, normalizer: Normalizer) -> Self {
        Self {
            cache: BackendCache::new(loader, capacity),
            normalizer,
        }
    }

    /// Synthesize `text` in the named language.
    ///
    /// Unknown language names fall back to the default language instead of
    /// failing. `speed` is the backend's length-scale multiplier.
    pub async fn synthesize(
        &self,
        text: &str,
        language_name: &str,
        speed: f32,
    ) -> Result<AudioClip, SynthesisError> {
        let code = language::resolve(language_name);

        // Spoken-math normalization only applies to the native language.
        let text = if code.is_default() {
            self.normalizer.normalize(text)
        } else {
            text.to_string()
        };

        info!(language = %code, text = %excerpt(&text), "synthesizing");

        let handle = self.cache.acquire(code).await?;
        let waveform = handle.infer(&text, speed).await?;

        Ok(quantize_waveform(&waveform.samples, waveform.sample_rate))
    }

    /// Eagerly load backends for `codes`, in order, through the same
    /// acquire path a request would use. Individual failures are logged and
    /// skipped so one broken model never blocks startup.
    pub async fn preload(&self, codes: &[LanguageCode]) {
        for &code in codes {
            match self.cache.acquire(code).await {
                Ok(_) => info!(language = %code, "pre-warmed synthesis backend"),
                Err(e) => warn!(language = %code, error = %e, "failed to pre-warm backend"),
            }
        }
    }

    /// Number of currently loaded backends (observability hook).
    pub async fn resident_backends(&self) -> usize {
        self.cache.resident_count().await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::core::engine::backend::{
        BackendHandle, BackendLoader, SynthesisBackend, Waveform,
    };
    use crate::errors::{InferenceError, LoadError};

    /// Backend that records the text it was asked to speak.
    struct RecordingBackend {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SynthesisBackend for RecordingBackend {
        async fn infer(&self, text: &str, _speed: f32) -> Result<Waveform, InferenceError> {
            self.seen.lock().push(text.to_string());
            Ok(Waveform {
                samples: vec![0.25; 160],
                sample_rate: 16_000,
            })
        }

        fn sample_rate(&self) -> u32 {
            16_000
        }
    }

    struct RecordingLoader {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl BackendLoader for RecordingLoader {
        async fn load(&self, code: LanguageCode) -> Result<BackendHandle, LoadError> {
            Ok(BackendHandle::new(
                code,
                Box::new(RecordingBackend {
                    seen: Arc::clone(&self.seen),
                }),
            ))
        }
    }

    fn recording_engine() -> (SynthesisEngine, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let loader = Arc::new(RecordingLoader {
            seen: Arc::clone(&seen),
        });
        let engine = SynthesisEngine::new(loader, 3, Normalizer::default());
        (engine, seen)
    }

    #[tokio::test]
    async fn native_language_text_is_normalized_before_inference() {
        let (engine, seen) = recording_engine();
        engine.synthesize("2+2=4", "english", 1.0).await.unwrap();
        assert_eq!(seen.lock().as_slice(), ["2 plus 2 equals 4"]);
    }

    #[tokio::test]
    async fn other_languages_skip_normalization() {
        let (engine, seen) = recording_engine();
        engine.synthesize("2+2=4", "hindi", 1.0).await.unwrap();
        assert_eq!(seen.lock().as_slice(), ["2+2=4"]);
    }

    #[tokio::test]
    async fn unknown_language_falls_back_to_default() {
        let (engine, seen) = recording_engine();
        engine.synthesize("a+b", "martian", 1.0).await.unwrap();
        // Fallback to the default language means normalization applies.
        assert_eq!(seen.lock().as_slice(), ["a plus b"]);
    }

    #[tokio::test]
    async fn produces_quantized_pcm() {
        let (engine, _) = recording_engine();
        let clip = engine.synthesize("hello", "english", 1.0).await.unwrap();
        assert_eq!(clip.sample_rate, 16_000);
        // Constant 0.25 waveform peaks at full scale after normalization.
        assert!(clip.samples.iter().all(|&s| s == i16::MAX));
    }

    #[tokio::test]
    async fn preload_survives_failures() {
        struct FlakyLoader;

        #[async_trait]
        impl BackendLoader for FlakyLoader {
            async fn load(&self, code: LanguageCode) -> Result<BackendHandle, LoadError> {
                if code.as_str() == "san" {
                    return Err(LoadError::ModelUnavailable("san".into()));
                }
                Ok(BackendHandle::new(
                    code,
                    Box::new(crate::core::engine::tone::ToneBackend::new(code)),
                ))
            }
        }

        let engine = SynthesisEngine::new(Arc::new(FlakyLoader), 3, Normalizer::default());
        let codes = [
            language::resolve("english"),
            language::resolve("sanskrit"),
            language::resolve("hindi"),
        ];
        engine.preload(&codes).await;
        assert_eq!(engine.resident_backends().await, 2);
    }
}
