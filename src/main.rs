// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::location_service::LocationService;
use crate::application::selection_store::SelectionStore;
use crate::application::telemetry_source::TelemetrySource;
use crate::application::view_service::ViewService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::http_backend::HttpTelemetrySource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    current_view, health_check, list_locations, metric_series, select_location,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_config()?;

    // Create telemetry source (infrastructure layer)
    let source: Arc<dyn TelemetrySource> = Arc::new(HttpTelemetrySource::new(&config.backend)?);

    // Create services (application layer)
    let store = Arc::new(SelectionStore::new(source.clone()));
    let location_service = LocationService::new(source);
    let view_service = ViewService::new(store, config.table.missing_value_policy);

    // Create application state
    let state = Arc::new(AppState {
        location_service,
        view_service,
    });

    // Build router (presentation layer)
    // Responses are compressed in json_response, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/locations", get(list_locations))
        .route("/locations/:id/select", post(select_location))
        .route("/view", get(current_view))
        .route("/view/series/:metric", get(metric_series))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_addr))?;
    tracing::info!(
        "Starting location-telemetry-view service on {} (backend {})",
        addr,
        config.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
