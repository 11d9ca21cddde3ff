// Main entry point - Dependency injection and server setup
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use flight_cancellations::application::flight_repository::FlightRepository;
use flight_cancellations::infrastructure::config::load_config;
use flight_cancellations::infrastructure::upstash_repository::UpstashRepository;
use flight_cancellations::presentation::app_state::AppState;
use flight_cancellations::presentation::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config()?;

    // Create repository (infrastructure layer); no URL means no fetch
    let repository: Option<Arc<dyn FlightRepository>> =
        match UpstashRepository::from_settings(&config.store)? {
            Some(repository) => Some(Arc::new(repository)),
            None => {
                tracing::warn!("No key-value store URL configured; the dashboard will show no data");
                None
            }
        };

    // Create application state
    let state = Arc::new(AppState::new(repository, config.counter.clone())?);

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!("Starting flight-cancellations dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
