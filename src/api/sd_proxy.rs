//! Image-generation proxy endpoint
//!
//! POST /api/sd-proxy

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};

use crate::error::ApiError;
use crate::schemas::{parse_lenient, ImageGeneration, ImageRequest};
use crate::server::state::AppState;
use crate::utils::truncate_str;

const LOGGED_PROMPT_CHARS: usize = 100;

/// Forward a prompt to the configured image provider.
pub async fn sd_proxy(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ImageGeneration>, ApiError> {
    let request: ImageRequest = parse_lenient(&body?);

    tracing::info!(
        provider = state.image.provider().name(),
        prompt = %truncate_str(request.prompt_text(), LOGGED_PROMPT_CHARS),
        "SD proxy request"
    );

    let generation = state.image.generate(&request).await?;

    Ok(Json(generation))
}
