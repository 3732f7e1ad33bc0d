//! Chat-completion proxy endpoint
//!
//! POST /api/llm-proxy

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};

use crate::error::ApiError;
use crate::schemas::{parse_lenient, ChatCompletion, ChatRequest};
use crate::server::state::AppState;
use crate::utils::truncate_str;

/// Characters of the prompt written to the log
const LOGGED_PROMPT_CHARS: usize = 100;

/// Forward a conversation to the configured chat provider.
///
/// The body is read leniently: a missing or malformed body is handled as
/// `{}`, which with no provider configured yields a mock reply. A body the
/// server cannot read at all, such as one over the size limit, is answered
/// with the JSON error envelope.
pub async fn llm_proxy(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatCompletion>, ApiError> {
    let request: ChatRequest = parse_lenient(&body?);

    tracing::info!(
        provider = state.chat.provider().name(),
        message_count = request.messages.as_ref().map_or(0, Vec::len),
        prompt = %truncate_str(request.last_message_text(), LOGGED_PROMPT_CHARS),
        "LLM proxy request"
    );

    let completion = state.chat.complete(&request).await?;

    Ok(Json(completion))
}
