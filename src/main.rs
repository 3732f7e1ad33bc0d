//! Dream Weaver Proxy
//!
//! Chat and image generation proxy with a mock fallback when no provider
//! is configured.

use anyhow::Result;
use clap::Parser;
use dream_weaver_proxy::{
    config::{Environment, Settings},
    server::App,
};
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Dream Weaver Proxy
///
/// Forwards chat and image requests to OpenAI, a local LLM, Stable
/// Diffusion or Replicate, depending on which are configured.
#[derive(Parser, Debug)]
#[command(name = "dream-weaver-proxy")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT env var)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides HOST env var)
    #[arg(long)]
    host: Option<String>,

    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL env var)
    #[arg(long)]
    log_level: Option<String>,

    /// Environment: dev, staging, prod (overrides ENVIRONMENT env var)
    #[arg(short, long)]
    env: Option<Environment>,

    /// Seed for mock replies (overrides MOCK_SEED env var)
    #[arg(long)]
    mock_seed: Option<u64>,

    /// Upstream call timeout in seconds (overrides UPSTREAM_TIMEOUT_SECS env var)
    #[arg(long)]
    upstream_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first (before logging, so we can use log_level)
    let mut settings = Settings::load()?;

    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(env) = args.env {
        settings.environment = env;
    }
    if let Some(seed) = args.mock_seed {
        settings.mock_seed = Some(seed);
    }
    if let Some(secs) = args.upstream_timeout {
        settings.upstream_timeout = Duration::from_secs(secs);
    }

    init_tracing(&settings.log_level);

    settings.validate()?;

    tracing::info!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        environment = %settings.environment,
        host = %settings.host,
        port = %settings.port,
        chat_provider = settings.chat_provider.name(),
        image_provider = settings.image_provider.name(),
        "Starting application"
    );

    let app = App::new(settings)?;

    app.run_with_graceful_shutdown().await?;

    tracing::info!("Application shutdown complete");

    Ok(())
}

/// Initialize tracing subscriber with JSON console output
fn init_tracing(log_level: &str) {
    // Build filter from RUST_LOG env var or use provided log level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let console_layer = fmt::layer().json().with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
