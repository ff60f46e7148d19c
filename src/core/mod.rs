pub mod audio;
pub mod engine;
pub mod language;
pub mod normalize;
pub mod segmenter;
pub mod translate;

// Re-export commonly used types for convenience
pub use audio::{AudioClip, encode_wav, quantize_waveform};
pub use engine::{
    BackendCache, BackendHandle, BackendLoader, RemoteLoader, SynthesisBackend, SynthesisEngine,
    ToneLoader, Waveform,
};
pub use language::LanguageCode;
pub use normalize::Normalizer;
pub use segmenter::{SegmenterConfig, TextSegment, segment};
pub use translate::{HttpTranslator, TranslationBackend, translate_if_needed};
