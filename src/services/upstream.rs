//! Outbound HTTP plumbing shared by the chat and image services
//!
//! One POST per request, no retries. The whole exchange (send and body
//! read) is bounded by the configured upstream timeout.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::utils::{with_timeout, TimeoutError};

/// Upstream services the proxy can call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    OpenAi,
    LocalLlm,
    StableDiffusion,
    Replicate,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::OpenAi => write!(f, "OpenAI"),
            Upstream::LocalLlm => write!(f, "LM Studio"),
            Upstream::StableDiffusion => write!(f, "SD API"),
            Upstream::Replicate => write!(f, "Replicate"),
        }
    }
}

/// Errors from a single upstream call
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{upstream} error: {status}")]
    Status { upstream: Upstream, status: u16 },

    #[error("{upstream} request failed: {source}")]
    Http {
        upstream: Upstream,
        #[source]
        source: reqwest::Error,
    },

    #[error("{upstream} did not respond within {after:?}")]
    Timeout { upstream: Upstream, after: Duration },
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout { .. })
    }
}

/// Thin wrapper over `reqwest::Client` that applies the timeout and maps
/// failures into `UpstreamError`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, timeout })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send `request` and decode a 2xx JSON body.
    ///
    /// Any non-2xx status is an error; its body is logged and discarded.
    pub async fn send_json<T>(&self, upstream: Upstream, request: RequestBuilder) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(
                    upstream = %upstream,
                    status = status.as_u16(),
                    body = %crate::utils::truncate_str(&body, 500),
                    "Upstream returned an error status"
                );
                return Ok::<_, reqwest::Error>(Err(status.as_u16()));
            }

            response.json::<T>().await.map(Ok)
        };

        match with_timeout(self.timeout, exchange).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(status)) => Err(UpstreamError::Status { upstream, status }),
            Err(TimeoutError::Inner(source)) => Err(UpstreamError::Http { upstream, source }),
            Err(TimeoutError::Timeout(after)) => Err(UpstreamError::Timeout { upstream, after }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "abc"})))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(Duration::from_secs(5)).unwrap();
        let request = client.client().post(format!("{}/ok", server.uri()));
        let body: Value = client.send_json(Upstream::Replicate, request).await.unwrap();
        assert_eq!(body["id"], "abc");
    }

    #[tokio::test]
    async fn test_send_json_maps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(Duration::from_secs(5)).unwrap();
        let request = client.client().post(server.uri());
        let err = client.send_json::<Value>(Upstream::OpenAi, request).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 401, .. }));
        assert_eq!(err.to_string(), "OpenAI error: 401");
    }

    #[tokio::test]
    async fn test_send_json_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(Duration::from_millis(50)).unwrap();
        let request = client.client().post(server.uri());
        let err = client.send_json::<Value>(Upstream::StableDiffusion, request).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_send_json_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = UpstreamClient::new(Duration::from_secs(5)).unwrap();
        let request = client.client().post(server.uri());
        let err = client.send_json::<Value>(Upstream::LocalLlm, request).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Http { upstream: Upstream::LocalLlm, .. }));
    }
}
