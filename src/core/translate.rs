//! Translation seam
//!
//! Optional pre-synthesis step: translate the input into the target
//! language before it reaches the pipeline. Translation failure is always
//! recoverable: the caller proceeds with the original text and the failure
//! is only logged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::language::LanguageCode;
use crate::errors::TranslationError;

/// External translation capability.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` into the language identified by `target`, an
    /// ISO 639-1 code in the translation backend's own scheme.
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError>;
}

/// Translate `text` for `code` when needed.
///
/// No-op for the native language. For any other language the internal code
/// is mapped into the backend's scheme and the backend invoked; on any
/// failure the original text is returned untranslated. Translation is
/// best-effort and never aborts synthesis.
pub async fn translate_if_needed(
    backend: Option<&dyn TranslationBackend>,
    text: &str,
    code: LanguageCode,
) -> String {
    if code.is_default() {
        return text.to_string();
    }

    let result = async {
        let backend = backend.ok_or(TranslationError::NotConfigured)?;
        let target = code
            .translation_code()
            .ok_or_else(|| TranslationError::UnmappedLanguage(code.as_str().to_string()))?;
        backend.translate(text, target).await
    }
    .await;

    match result {
        Ok(translated) => {
            debug!(language = %code, "translated input text");
            translated
        }
        Err(e) => {
            warn!(language = %code, error = %e, "translation failed, using original text");
            text.to_string()
        }
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// HTTP translation backend (LibreTranslate-compatible API).
pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target,
            format: "text",
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranslationError::Transport(format!(
                "translation backend returned {}",
                response.status()
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        Ok(body.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::language::resolve;

    struct UpperTranslator;

    #[async_trait]
    impl TranslationBackend for UpperTranslator {
        async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
            Ok(format!("[{target}] {}", text.to_uppercase()))
        }
    }

    struct BrokenTranslator;

    #[async_trait]
    impl TranslationBackend for BrokenTranslator {
        async fn translate(&self, _text: &str, _target: &str) -> Result<String, TranslationError> {
            Err(TranslationError::Transport("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn native_language_is_a_noop() {
        let backend = UpperTranslator;
        let out = translate_if_needed(Some(&backend), "hello", resolve("english")).await;
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn maps_code_into_backend_scheme() {
        let backend = UpperTranslator;
        let out = translate_if_needed(Some(&backend), "hello", resolve("hindi")).await;
        assert_eq!(out, "[hi] HELLO");
    }

    #[tokio::test]
    async fn failure_falls_back_to_original_text() {
        let backend = BrokenTranslator;
        let out = translate_if_needed(Some(&backend), "hello", resolve("tamil")).await;
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn missing_backend_falls_back_to_original_text() {
        let out = translate_if_needed(None, "hello", resolve("french")).await;
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn http_translator_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/translate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"translatedText": "namaste duniya"}"#)
            .create_async()
            .await;

        let translator = HttpTranslator::new(server.url());
        let out = translator.translate("hello world", "hi").await.unwrap();
        assert_eq!(out, "namaste duniya");
    }

    #[tokio::test]
    async fn http_translator_error_status_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/translate")
            .with_status(502)
            .create_async()
            .await;

        let translator = HttpTranslator::new(server.url());
        let err = translator.translate("hello", "hi").await.unwrap_err();
        assert!(matches!(err, TranslationError::Transport(_)));
    }
}
