use anyhow::Context;
use iss_tracker::config::Config;
use iss_tracker::feed::{FeedSource, HttpFeed};
use iss_tracker::geocode::{CachedGeocoder, NominatimGeocoder};
use iss_tracker::router::create_router;
use iss_tracker::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(version = iss_tracker::SERVICE_VERSION, "Starting ISS tracker service");

    let config = Config::from_env()?;

    // Without an initial dataset there is nothing to serve
    let feed = HttpFeed::new(config.feed_url.clone(), config.fetch_timeout, &config.user_agent)?;
    let dataset = feed
        .fetch()
        .await
        .context("initial ISS feed download failed")?;

    let geocoder = NominatimGeocoder::new(
        config.geocoder_url.clone(),
        config.geocode_timeout,
        &config.user_agent,
    )?;

    let state = AppState::new(
        dataset,
        Arc::new(feed),
        Arc::new(CachedGeocoder::new(geocoder, config.geocode_cache_capacity)),
        config.geocode_timeout,
    );

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
