//! Application settings and configuration
//!
//! Settings are read once at startup from environment variables (and a
//! `.env` file when present) and resolved into explicit provider choices.
//! Handlers receive them through `AppState` and never touch process state.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::env;
use std::fmt;
use std::time::Duration;

use crate::utils::DEFAULT_UPSTREAM_TIMEOUT;

/// Default OpenAI API base
pub const OPENAI_API_BASE: &str = "https://api.openai.com";

/// Default Replicate API base
pub const REPLICATE_API_BASE: &str = "https://api.replicate.com";

/// Application environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!("Invalid environment: {}. Expected: development, staging, or production", s),
        }
    }
}

/// Backend for the chat-completion proxy.
///
/// Resolution order is OpenAI, then local LLM, then mock.
#[derive(Clone, PartialEq, Eq)]
pub enum ChatProvider {
    OpenAi { api_key: String, base_url: String },
    LocalLlm { base_url: String },
    Mock,
}

impl ChatProvider {
    pub fn name(&self) -> &'static str {
        match self {
            ChatProvider::OpenAi { .. } => "openai",
            ChatProvider::LocalLlm { .. } => "local-llm",
            ChatProvider::Mock => "mock",
        }
    }
}

impl fmt::Debug for ChatProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatProvider::OpenAi { base_url, .. } => f
                .debug_struct("OpenAi")
                .field("api_key", &"<redacted>")
                .field("base_url", base_url)
                .finish(),
            ChatProvider::LocalLlm { base_url } => {
                f.debug_struct("LocalLlm").field("base_url", base_url).finish()
            }
            ChatProvider::Mock => write!(f, "Mock"),
        }
    }
}

/// Backend for the image-generation proxy.
///
/// Resolution order is Stable Diffusion, then Replicate, then mock.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageProvider {
    StableDiffusion { base_url: String },
    Replicate { api_token: String, base_url: String },
    Mock,
}

impl ImageProvider {
    pub fn name(&self) -> &'static str {
        match self {
            ImageProvider::StableDiffusion { .. } => "stable-diffusion",
            ImageProvider::Replicate { .. } => "replicate",
            ImageProvider::Mock => "mock",
        }
    }
}

impl fmt::Debug for ImageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageProvider::StableDiffusion { base_url } => f
                .debug_struct("StableDiffusion")
                .field("base_url", base_url)
                .finish(),
            ImageProvider::Replicate { base_url, .. } => f
                .debug_struct("Replicate")
                .field("api_token", &"<redacted>")
                .field("base_url", base_url)
                .finish(),
            ImageProvider::Mock => write!(f, "Mock"),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,

    // Server settings
    pub host: String,
    pub port: u16,

    // Providers
    pub chat_provider: ChatProvider,
    pub image_provider: ImageProvider,

    /// Bound on each outbound provider call
    pub upstream_timeout: Duration,

    /// Fixed seed for mock content; fresh entropy per request when unset
    pub mock_seed: Option<u64>,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Unset and blank values are treated the same way. Values are parsed
    /// but not range-checked; call [`Settings::validate`] once any overrides
    /// have been applied.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let chat_provider = if let Some(api_key) = get("OPENAI_API_KEY") {
            ChatProvider::OpenAi {
                api_key,
                base_url: normalize_base_url(&get_or("OPENAI_BASE_URL", OPENAI_API_BASE)),
            }
        } else if let Some(url) = get("LLM_API_URL") {
            ChatProvider::LocalLlm {
                base_url: normalize_base_url(&url),
            }
        } else {
            ChatProvider::Mock
        };

        let image_provider = if let Some(url) = get("SD_API_URL") {
            ImageProvider::StableDiffusion {
                base_url: normalize_base_url(&url),
            }
        } else if let Some(api_token) = get("REPLICATE_API_TOKEN") {
            ImageProvider::Replicate {
                api_token,
                base_url: normalize_base_url(&get_or("REPLICATE_BASE_URL", REPLICATE_API_BASE)),
            }
        } else {
            ImageProvider::Mock
        };

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .context("Invalid UPSTREAM_TIMEOUT_SECS value")?,
            ),
            None => DEFAULT_UPSTREAM_TIMEOUT,
        };

        let mock_seed = get("MOCK_SEED")
            .map(|seed| seed.parse::<u64>())
            .transpose()
            .context("Invalid MOCK_SEED value")?;

        Ok(Self {
            app_name: get_or("APP_NAME", "dream-weaver-proxy"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: get_or("ENVIRONMENT", "development")
                .parse()
                .context("Invalid ENVIRONMENT value")?,
            log_level: get_or("LOG_LEVEL", "info"),
            host: get_or("HOST", "0.0.0.0"),
            port: get_or("PORT", "3000")
                .parse()
                .context("Invalid PORT value")?,
            chat_provider,
            image_provider,
            upstream_timeout,
            mock_seed,
        })
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if self.upstream_timeout.is_zero() {
            anyhow::bail!("Upstream timeout must be > 0");
        }

        if self.environment == Environment::Production && self.chat_provider == ChatProvider::Mock {
            tracing::warn!("Running in production with the mock chat provider");
        }

        Ok(())
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "dream-weaver-proxy".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            chat_provider: ChatProvider::Mock,
            image_provider: ImageProvider::Mock,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            mock_seed: None,
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
