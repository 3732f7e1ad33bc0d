//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

/// Response for the health check endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
    pub chat_provider: &'static str,
    pub image_provider: &'static str,
}

/// Service health with the resolved provider names; no credentials.
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.to_string(),
        uptime_seconds: state.uptime_seconds(),
        chat_provider: state.chat.provider().name(),
        image_provider: state.image.provider().name(),
    })
}
