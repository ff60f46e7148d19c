//! Shared application state
//!
//! One `AppState` is built at startup and shared across every handler via
//! `Arc`. It owns the synthesis engine (and with it the backend cache, the
//! single shared mutable resource) and the optional translation backend.

use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::engine::{BackendLoader, RemoteLoader, SynthesisEngine, ToneLoader};
use crate::core::normalize::Normalizer;
use crate::core::translate::{HttpTranslator, TranslationBackend};

pub struct AppState {
    pub config: ServerConfig,
    pub engine: Arc<SynthesisEngine>,
    pub translator: Option<Arc<dyn TranslationBackend>>,
}

impl AppState {
    /// Build state from configuration, choosing collaborators from the
    /// configured URLs: a remote inference worker when one is set, the
    /// built-in tone placeholder otherwise.
    pub async fn new(config: ServerConfig) -> Arc<Self> {
        let loader: Arc<dyn BackendLoader> = match &config.inference_url {
            Some(url) => {
                info!(url = %url, "using remote inference worker");
                Arc::new(RemoteLoader::new(url.clone()))
            }
            None => {
                info!("no inference worker configured, using built-in tone backend");
                Arc::new(ToneLoader)
            }
        };

        let translator: Option<Arc<dyn TranslationBackend>> = config
            .translator_url
            .as_ref()
            .map(|url| Arc::new(HttpTranslator::new(url.clone())) as Arc<dyn TranslationBackend>);
        if translator.is_none() {
            info!("no translation backend configured, synthesizing original text");
        }

        Self::with_collaborators(config, loader, translator)
    }

    /// Build state with explicit collaborators (used by tests to inject
    /// fakes).
    pub fn with_collaborators(
        config: ServerConfig,
        loader: Arc<dyn BackendLoader>,
        translator: Option<Arc<dyn TranslationBackend>>,
    ) -> Arc<Self> {
        let normalizer = Normalizer::new(config.normalization.clone());
        let engine = Arc::new(SynthesisEngine::new(
            loader,
            config.max_loaded_backends,
            normalizer,
        ));
        Arc::new(Self {
            config,
            engine,
            translator,
        })
    }

    pub fn translator_ref(&self) -> Option<&dyn TranslationBackend> {
        self.translator.as_deref()
    }
}
