//! Chat-completion service
//!
//! Dispatches a chat request to the configured provider, or composes a
//! mock reply when none is configured.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::config::ChatProvider;
use crate::schemas::chat::{ChatCompletion, ChatRequest, UpstreamChatRequest, OPENAI_MODEL};
use crate::services::story::mock_completion;
use crate::services::upstream::{Upstream, UpstreamClient, UpstreamError};

pub struct ChatService {
    provider: ChatProvider,
    upstream: UpstreamClient,
    mock_seed: Option<u64>,
}

impl ChatService {
    pub fn new(provider: ChatProvider, upstream: UpstreamClient, mock_seed: Option<u64>) -> Self {
        Self {
            provider,
            upstream,
            mock_seed,
        }
    }

    pub fn provider(&self) -> &ChatProvider {
        &self.provider
    }

    /// Produce a completion for `request`.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, UpstreamError> {
        let messages = request.messages.as_deref();

        match &self.provider {
            ChatProvider::OpenAi { api_key, base_url } => {
                let payload = UpstreamChatRequest::new(OPENAI_MODEL, messages);
                let http = self
                    .upstream
                    .client()
                    .post(format!("{}/v1/chat/completions", base_url))
                    .bearer_auth(api_key)
                    .json(&payload);

                let body: Value = self.upstream.send_json(Upstream::OpenAi, http).await?;
                Ok(ChatCompletion::Passthrough(body))
            }
            ChatProvider::LocalLlm { base_url } => {
                let payload = UpstreamChatRequest::new(request.model_or_default(), messages);
                let http = self
                    .upstream
                    .client()
                    .post(format!("{}/v1/chat/completions", base_url))
                    .json(&payload);

                let body: Value = self.upstream.send_json(Upstream::LocalLlm, http).await?;
                Ok(ChatCompletion::Passthrough(body))
            }
            ChatProvider::Mock => {
                let mut rng = match self.mock_seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Ok(ChatCompletion::Mock(mock_completion(
                    request.last_message_text(),
                    &mut rng,
                )))
            }
        }
    }
}
