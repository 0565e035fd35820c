use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hookbot::api::Api;
use hookbot::config::Config;
use hookbot::handlers::DemoBot;
use hookbot::server::{self, AppState, WEBHOOK_PATH};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hookbot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Bot API: {}", config.telegram.api_url);
    info!(
        "  Public URL: {}",
        config
            .server
            .public_url
            .as_ref()
            .map(|url| url.as_str())
            .unwrap_or("(from request headers)")
    );
    info!(
        "  Allowed updates: {}",
        config
            .telegram
            .allowed_updates
            .as_ref()
            .map(|kinds| kinds.join(", "))
            .unwrap_or_else(|| "all".to_string())
    );

    // Learn our own username so `/command@username` is recognized
    let api = Api::with_client(
        Api::http_client(config.telegram.request_timeout())?,
        config.telegram.api_url()?,
        config.telegram.bot_token.clone(),
    );
    let username = match api.get_me().await {
        Ok(me) => {
            info!("  Bot: {} (@{})", me.full_name(), me.username.as_deref().unwrap_or("-"));
            me.username
        }
        Err(e) => {
            warn!("Could not fetch bot identity, addressed commands will be ignored: {}", e);
            None
        }
    };

    let handler = Arc::new(DemoBot::new(username));
    let state = Arc::new(AppState::from_config(&config, handler)?);
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    info!(
        "Webhook server listening on {} (updates at {})",
        listener.local_addr()?,
        WEBHOOK_PATH
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook server failed")?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
