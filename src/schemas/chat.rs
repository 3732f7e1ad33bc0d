//! Chat proxy schema definitions
//!
//! Inbound request shape, the OpenAI-compatible payload sent upstream, and
//! the mock reply returned when no provider is configured.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{take_field, FromFields};

/// Model sent to the local LLM when the client names none
pub const DEFAULT_LOCAL_MODEL: &str = "local-model";

/// Model always used against OpenAI
pub const OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature for every upstream call
pub const TEMPERATURE: f64 = 0.7;

/// Completion budget for every upstream call
pub const MAX_TOKENS: u32 = 500;

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /api/llm-proxy`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    /// Conversation so far, kept as raw JSON so each message reaches the
    /// provider exactly as the client sent it
    pub messages: Option<Vec<Value>>,

    /// Model for the local LLM branch
    pub model: Option<String>,
}

impl FromFields for ChatRequest {
    fn from_fields(mut fields: Map<String, Value>) -> Self {
        Self {
            messages: take_field(&mut fields, "messages"),
            model: take_field(&mut fields, "model"),
        }
    }
}

impl ChatRequest {
    /// Text of the most recent message, or `""`.
    pub fn last_message_text(&self) -> &str {
        self.messages
            .as_deref()
            .and_then(|messages| messages.last())
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_LOCAL_MODEL)
    }
}

/// Payload posted to an OpenAI-compatible `/v1/chat/completions`
#[derive(Debug, Serialize)]
pub struct UpstreamChatRequest<'a> {
    pub model: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<&'a [Value]>,

    pub temperature: f64,
    pub max_tokens: u32,
}

impl<'a> UpstreamChatRequest<'a> {
    pub fn new(model: &'a str, messages: Option<&'a [Value]>) -> Self {
        Self {
            model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Reply of the chat proxy
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatCompletion {
    /// Provider body, passed through as received
    Passthrough(Value),

    /// Locally composed reply
    Mock(MockChatCompletion),
}

#[derive(Debug, Clone, Serialize)]
pub struct MockChatCompletion {
    pub choices: Vec<MockChoice>,
    pub usage: CompletionUsage,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MockChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantMessage {
    pub content: String,
    pub role: String,
}

/// Token accounting; the mock fills it with character counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

impl CompletionUsage {
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}
