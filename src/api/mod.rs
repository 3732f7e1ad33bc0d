//! API endpoint handlers module
//!
//! Contains all HTTP endpoint handler implementations.

pub mod health;
pub mod llm_proxy;
pub mod sd_proxy;

use crate::error::ApiError;

/// Fallback for any verb a proxy route does not accept.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
