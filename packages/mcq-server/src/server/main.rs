// Main entry point for the MCQ generation service

use std::time::Duration;

use anyhow::{Context, Result};
use mcq_server::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mcq_server=debug,mcq_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MCQ generation service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(model = %config.gemini_model, "Configuration loaded");

    let backend = config.backend();
    if backend.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; generation requests will fail until it is configured");
    }

    // Build application
    let app = build_app(backend, Duration::from_secs(config.request_timeout_secs));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Generate endpoint: http://localhost:{}{}", config.port, mcq_core::GENERATE_PATH);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
