//! API schema definitions
//!
//! Request and response types for the chat and image proxies, including the
//! payloads sent to each upstream provider.

pub mod chat;
pub mod image;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use chat::{ChatCompletion, ChatRequest, CompletionUsage, MockChatCompletion};
pub use image::{ImageGeneration, ImageRequest, MockImage, PendingPrediction};

/// Request types built field by field from a JSON object.
pub trait FromFields: Default {
    fn from_fields(fields: Map<String, Value>) -> Self;
}

/// Remove `key` and decode it; absent, `null` or mistyped values yield `None`.
pub fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    match fields.remove(key) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(field = key, error = %e, "Ignoring mistyped request field");
                None
            }
        },
    }
}

/// Parse a request body, treating an empty, malformed or non-object body
/// as `{}`.
pub fn parse_lenient<T: FromFields>(body: &[u8]) -> T {
    if body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => T::from_fields(fields),
        Ok(_) => {
            tracing::warn!("Request body is not a JSON object, treating it as empty");
            T::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Unparsable request body, treating it as empty");
            T::default()
        }
    }
}
