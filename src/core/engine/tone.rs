//! Built-in placeholder backend
//!
//! Deterministic tone synthesis used when no inference worker is configured:
//! the server boots, every route works, and tests exercise the full pipeline
//! without external services. Each word becomes a short sine burst whose
//! pitch is derived from the word's bytes, so identical text always yields
//! identical audio.

use std::f32::consts::TAU;

use async_trait::async_trait;

use crate::core::language::LanguageCode;
use crate::errors::{InferenceError, LoadError};

use super::backend::{BackendHandle, BackendLoader, SynthesisBackend, Waveform};

const TONE_SAMPLE_RATE: u32 = 16_000;

/// Seconds of audio per word at speed 1.0.
const SECONDS_PER_WORD: f32 = 0.15;

/// Placeholder synthesis engine for one language.
pub struct ToneBackend {
    code: LanguageCode,
}

impl ToneBackend {
    pub fn new(code: LanguageCode) -> Self {
        Self { code }
    }
}

/// A stable per-word pitch in the speech band.
fn word_pitch(word: &str, code: LanguageCode) -> f32 {
    let mut hash: u32 = 2166136261;
    for b in word.bytes().chain(code.as_str().bytes()) {
        hash ^= u32::from(b);
        hash = hash.wrapping_mul(16777619);
    }
    110.0 + (hash % 660) as f32
}

fn render(text: &str, speed: f32, code: LanguageCode) -> Waveform {
    let seconds_per_word = SECONDS_PER_WORD * speed.max(0.1);
    let samples_per_word = (seconds_per_word * TONE_SAMPLE_RATE as f32) as usize;

    let mut samples = Vec::new();
    for word in text.split_whitespace() {
        let pitch = word_pitch(word, code);
        for i in 0..samples_per_word {
            let t = i as f32 / TONE_SAMPLE_RATE as f32;
            // Short attack/decay envelope keeps word boundaries click-free.
            let envelope = (i.min(samples_per_word - i) as f32 / 64.0).min(1.0);
            samples.push((TAU * pitch * t).sin() * 0.8 * envelope);
        }
    }

    Waveform {
        samples,
        sample_rate: TONE_SAMPLE_RATE,
    }
}

#[async_trait]
impl SynthesisBackend for ToneBackend {
    async fn infer(&self, text: &str, speed: f32) -> Result<Waveform, InferenceError> {
        let text = text.to_string();
        let code = self.code;
        // Synthesis is CPU-bound; keep it off the async I/O threads.
        tokio::task::spawn_blocking(move || render(&text, speed, code))
            .await
            .map_err(|e| InferenceError::Backend(format!("tone synthesis task failed: {e}")))
    }

    fn sample_rate(&self) -> u32 {
        TONE_SAMPLE_RATE
    }
}

/// Loader for the placeholder engine. Loading never fails.
pub struct ToneLoader;

#[async_trait]
impl BackendLoader for ToneLoader {
    async fn load(&self, code: LanguageCode) -> Result<BackendHandle, LoadError> {
        Ok(BackendHandle::new(code, Box::new(ToneBackend::new(code))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::language::resolve;

    #[tokio::test]
    async fn produces_deterministic_audio() {
        let backend = ToneBackend::new(resolve("english"));
        let a = backend.infer("hello world", 1.0).await.unwrap();
        let b = backend.infer("hello world", 1.0).await.unwrap();
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.sample_rate, TONE_SAMPLE_RATE);
        assert!(!a.samples.is_empty());
    }

    #[tokio::test]
    async fn speed_scales_duration() {
        let backend = ToneBackend::new(resolve("english"));
        let normal = backend.infer("one two three", 1.0).await.unwrap();
        let slow = backend.infer("one two three", 2.0).await.unwrap();
        assert!(slow.samples.len() > normal.samples.len());
    }

    #[tokio::test]
    async fn empty_text_yields_empty_waveform() {
        let backend = ToneBackend::new(resolve("english"));
        let wave = backend.infer("", 1.0).await.unwrap();
        assert!(wave.samples.is_empty());
    }
}
