//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::Settings;
use crate::services::{ChatService, ImageService, UpstreamClient};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
///
/// Read-only after startup and cheaply cloneable (via Arc).
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Chat-completion provider dispatch
    pub chat: Arc<ChatService>,

    /// Image-generation provider dispatch
    pub image: Arc<ImageService>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state from resolved settings
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let settings = Arc::new(settings);

        tracing::debug!(
            timeout_secs = settings.upstream_timeout.as_secs_f64(),
            "Creating upstream HTTP client"
        );
        let upstream = UpstreamClient::new(settings.upstream_timeout)?;

        let chat = Arc::new(ChatService::new(
            settings.chat_provider.clone(),
            upstream.clone(),
            settings.mock_seed,
        ));
        let image = Arc::new(ImageService::new(settings.image_provider.clone(), upstream));

        tracing::info!(
            chat_provider = settings.chat_provider.name(),
            image_provider = settings.image_provider.name(),
            mock_seeded = settings.mock_seed.is_some(),
            "Application state initialized"
        );

        Ok(Self {
            settings,
            chat,
            image,
            start_time: Instant::now(),
        })
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
