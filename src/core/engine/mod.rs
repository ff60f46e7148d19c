//! Synthesis engine: backend seams, bounded cache, and the pipeline.

pub mod backend;
pub mod cache;
pub mod pipeline;
pub mod remote;
pub mod tone;

pub use backend::{BackendHandle, BackendLoader, SynthesisBackend, Waveform};
pub use cache::BackendCache;
pub use pipeline::SynthesisEngine;
pub use remote::{RemoteBackend, RemoteLoader};
pub use tone::{ToneBackend, ToneLoader};
