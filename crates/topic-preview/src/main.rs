//! Topic Preview - cached previews of forum topics
//!
//! Proxies the forum's topic API and serves sanitized, length-bounded
//! previews of each topic's opening post.

use std::sync::Arc;

use forum_client::ForumClient;
use topic_preview::error::{Result, ServiceError};
use topic_preview::server::{cors_layer, start_server, ServerState, SharedState};
use topic_preview::{Config, PreviewCache, PreviewService};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("topic_preview=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Topic Preview service...");
    info!("Port: {}", config.port);
    info!("Forum: {}", config.forum_base_url);
    info!("Cache sweep interval: {} seconds", config.sweep_interval.as_secs());

    // One cache for the whole process, swept in the background
    let cache = Arc::new(PreviewCache::new());
    ttl_cache::spawn_sweeper(cache.clone(), config.sweep_interval);

    let forum = ForumClient::with_base_url(&config.forum_base_url)?;
    let previews = PreviewService::new(cache, Arc::new(forum));

    let state: SharedState = Arc::new(ServerState::new(previews));

    // Start HTTP server (blocking)
    start_server(state, config.port, cors_layer(&config.cors_origins))
        .await
        .map_err(|e| ServiceError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
