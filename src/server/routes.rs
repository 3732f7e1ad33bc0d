//! Application routing
//!
//! This module defines all HTTP routes for the application.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::{health, llm_proxy, method_not_allowed, sd_proxy};
use crate::middleware::{cors, logging::log_request};
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Proxy routes accept POST only; OPTIONS never reaches them
    let proxy_routes = Router::new()
        .route(
            "/llm-proxy",
            post(llm_proxy::llm_proxy).fallback(method_not_allowed),
        )
        .route(
            "/sd-proxy",
            post(sd_proxy::sd_proxy).fallback(method_not_allowed),
        );

    let health_routes = Router::new().route("/health", get(health::health_check));

    let [allow_origin, allow_methods, allow_headers] = cors::header_layers();

    // Layer order: last added = outermost = runs first
    Router::new()
        .nest("/api", proxy_routes)
        .merge(health_routes)
        .layer(middleware::from_fn(cors::preflight))
        .layer(allow_origin)
        .layer(allow_methods)
        .layer(allow_headers)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
