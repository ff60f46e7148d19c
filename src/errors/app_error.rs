//! HTTP-facing error type
//!
//! Everything a REST handler can fail with, mapped onto a status code and a
//! JSON body. Validation problems are client errors; anything that went
//! wrong during synthesis is a server fault.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use super::{AudioError, SynthesisError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Empty or malformed input, rejected before any work begins.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Synthesis(_) | AppError::Audio(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{InferenceError, LoadError};

    #[test]
    fn validation_maps_to_bad_request() {
        let resp = AppError::Validation("No text provided".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn synthesis_failures_map_to_server_fault() {
        let load: AppError =
            SynthesisError::Load(LoadError::ModelUnavailable("xyz".into())).into();
        assert_eq!(
            load.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let infer: AppError =
            SynthesisError::Inference(InferenceError::Backend("boom".into())).into();
        assert_eq!(
            infer.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
