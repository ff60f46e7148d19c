use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, speak};
use crate::state::AppState;
use std::sync::Arc;

/// Create the HTTP API router
///
/// # Endpoints
///
/// `GET /` - health check
/// `GET /languages` - supported language names
/// `POST /synthesize` - single-shot synthesis returning a WAV body
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/languages", get(api::list_languages))
        .route("/synthesize", post(speak::synthesize_handler))
        .layer(TraceLayer::new_for_http())
}
