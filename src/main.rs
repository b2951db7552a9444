use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use translation_gateway::{
    config::Config,
    dispatcher::Dispatcher,
    server::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translation_gateway=info".parse()?),
        )
        .init();

    info!("Starting translation gateway");

    let config = Config::from_env()?;

    match &config.openai_api_key {
        Some(key) => info!("✓ OpenAI configured (key: {}...)", key_prefix(key)),
        None => warn!("OPENAI_API_KEY is not set; GPT models will be unavailable"),
    }
    match &config.deepl_api_key {
        Some(_) => info!("✓ DeepL configured ({})", config.deepl_api_url),
        None => warn!("DEEPL_API_KEY is not set; DeepL models will be unavailable"),
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let state = Arc::new(AppState {
        dispatcher: Dispatcher::new(&config, client),
    });
    let app = server::router(state, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Translation API listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// First 8 characters of a credential, safe to log
fn key_prefix(key: &str) -> String {
    key.chars().take(8).collect()
}
