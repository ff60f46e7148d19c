//! Remote inference worker client
//!
//! Backend implementation that delegates synthesis to an external inference
//! worker over HTTP. Loading probes the worker for the requested model and
//! records its sample rate; inference posts text and receives the raw f32
//! waveform back as JSON.
//!
//! Worker API:
//! - `GET  {base}/v1/models/{code}`  -> `{ "sample_rate": 16000 }`
//! - `POST {base}/v1/synthesize`     -> `{ "samples": [..], "sample_rate": 16000 }`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::language::LanguageCode;
use crate::errors::{InferenceError, LoadError};

use super::backend::{BackendHandle, BackendLoader, SynthesisBackend, Waveform};

#[derive(Debug, Deserialize)]
struct ModelInfo {
    sample_rate: u32,
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    language: &'a str,
    /// Length-scale multiplier; > 1.0 slows speech down.
    length_scale: f32,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    samples: Vec<f32>,
    sample_rate: u32,
}

/// One loaded model on the remote worker.
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
    code: LanguageCode,
    sample_rate: u32,
}

#[async_trait]
impl SynthesisBackend for RemoteBackend {
    async fn infer(&self, text: &str, speed: f32) -> Result<Waveform, InferenceError> {
        let request = SynthesizeRequest {
            text,
            language: self.code.as_str(),
            length_scale: speed,
        };

        let response = self
            .client
            .post(format!("{}/v1/synthesize", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InferenceError::Backend(format!(
                "inference worker returned {} for language '{}'",
                response.status(),
                self.code
            )));
        }

        let body: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        debug!(
            language = %self.code,
            samples = body.samples.len(),
            "received waveform from inference worker"
        );

        Ok(Waveform {
            samples: body.samples,
            sample_rate: body.sample_rate,
        })
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Loads models on the remote inference worker.
pub struct RemoteLoader {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteLoader {
    /// `base_url` without a trailing slash, e.g. `http://worker:9000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BackendLoader for RemoteLoader {
    async fn load(&self, code: LanguageCode) -> Result<BackendHandle, LoadError> {
        let url = format!("{}/v1/models/{}", self.base_url, code);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        if response.status() == http::StatusCode::NOT_FOUND {
            return Err(LoadError::ModelUnavailable(code.as_str().to_string()));
        }
        if !response.status().is_success() {
            return Err(LoadError::Backend {
                code: code.as_str().to_string(),
                reason: format!("inference worker returned {}", response.status()),
            });
        }

        let info: ModelInfo = response
            .json()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        Ok(BackendHandle::new(
            code,
            Box::new(RemoteBackend {
                client: self.client.clone(),
                base_url: self.base_url.clone(),
                code,
                sample_rate: info.sample_rate,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::language::resolve;

    #[tokio::test]
    async fn load_probes_worker_and_records_sample_rate() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/models/eng")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sample_rate": 22050}"#)
            .create_async()
            .await;

        let loader = RemoteLoader::new(server.url());
        let handle = loader.load(resolve("english")).await.unwrap();
        assert_eq!(handle.sample_rate(), 22_050);
    }

    #[tokio::test]
    async fn missing_model_surfaces_load_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/models/san")
            .with_status(404)
            .create_async()
            .await;

        let loader = RemoteLoader::new(server.url());
        let err = loader.load(resolve("sanskrit")).await.unwrap_err();
        assert!(matches!(err, LoadError::ModelUnavailable(ref c) if c == "san"));
    }

    #[tokio::test]
    async fn infer_round_trips_waveform() {
        let mut server = mockito::Server::new_async().await;
        let _load = server
            .mock("GET", "/v1/models/hin")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sample_rate": 16000}"#)
            .create_async()
            .await;
        let _synth = server
            .mock("POST", "/v1/synthesize")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"samples": [0.0, 0.5, -0.5], "sample_rate": 16000}"#)
            .create_async()
            .await;

        let loader = RemoteLoader::new(server.url());
        let handle = loader.load(resolve("hindi")).await.unwrap();
        let wave = handle.infer("text", 1.1).await.unwrap();
        assert_eq!(wave.samples, vec![0.0, 0.5, -0.5]);
        assert_eq!(wave.sample_rate, 16_000);
    }

    #[tokio::test]
    async fn worker_error_surfaces_inference_error() {
        let mut server = mockito::Server::new_async().await;
        let _load = server
            .mock("GET", "/v1/models/eng")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sample_rate": 16000}"#)
            .create_async()
            .await;
        let _synth = server
            .mock("POST", "/v1/synthesize")
            .with_status(500)
            .create_async()
            .await;

        let loader = RemoteLoader::new(server.url());
        let handle = loader.load(resolve("english")).await.unwrap();
        let err = handle.infer("text", 1.0).await.unwrap_err();
        assert!(matches!(err, InferenceError::Backend(_)));
    }
}
