//! Health check and language listing endpoints

use axum::Json;
use serde::Serialize;

use crate::core::language;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe, no side effects.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}

/// Recognized user-facing language names.
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: language::display_names(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_ok() {
        let response = health_check().await;
        assert_eq!(response.0.status, "ok");
    }

    #[tokio::test]
    async fn languages_lists_display_names() {
        let response = list_languages().await;
        assert!(response.0.languages.contains(&"English".to_string()));
        assert!(response.0.languages.contains(&"Hindi".to_string()));
    }
}
