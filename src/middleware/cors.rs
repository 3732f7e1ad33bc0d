//! CORS handling
//!
//! Every response carries the same three fixed CORS headers, whatever the
//! request. `OPTIONS` is answered here with an empty `200` and never reaches
//! a handler.

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST,OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Short-circuit CORS preflight requests.
pub async fn preflight(request: Request, next: Next) -> Response<Body> {
    if request.method() == Method::OPTIONS {
        tracing::debug!(path = %request.uri().path(), "Answering CORS preflight");
        return StatusCode::OK.into_response();
    }

    next.run(request).await
}

/// Layers that stamp the CORS headers onto every response.
pub fn header_layers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
        overriding(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
        overriding(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
    ]
}

fn overriding(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}
