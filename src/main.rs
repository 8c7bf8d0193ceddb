mod api;
mod config;
mod error;
mod frontend;
mod models;
mod services;

use crate::api::AppState;
use crate::config::Config;
use crate::services::{DeepFaceClassifier, PlaylistBuilder, SpotifyAuth, SpotifyClient};
use axum::http::{header, HeaderValue, Method};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,moodmix=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // One pooled client shared by every outbound integration
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    // Initialize services
    let spotify_client = Arc::new(SpotifyClient::new(
        config.spotify_api_url.clone(),
        http_client.clone(),
    ));
    let spotify_auth = Arc::new(SpotifyAuth::new(&config, http_client.clone()));
    let emotion_classifier = Arc::new(DeepFaceClassifier::new(
        config.emotion_service_url.clone(),
        http_client.clone(),
    ));
    let playlist_builder = Arc::new(PlaylistBuilder::new(spotify_client));

    let app_state = Arc::new(AppState {
        spotify_auth,
        emotion_classifier,
        playlist_builder,
    });

    let app = api::router(app_state, config.max_upload_bytes)
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.cors_origins));

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
