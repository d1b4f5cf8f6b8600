use std::net::SocketAddr;

use ptv_provider::ptv::{PtvClient, PtvConfig};
use ptv_provider::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get credentials from environment
    let devid = std::env::var("PTV_DEVID").unwrap_or_else(|_| {
        warn!("PTV_DEVID not set");
        String::new()
    });
    let api_key = std::env::var("PTV_API_KEY").unwrap_or_else(|_| {
        warn!("PTV_API_KEY not set");
        String::new()
    });

    let mut config = PtvConfig::new(devid, api_key);
    if let Ok(base_url) = std::env::var("PTV_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    // Empty credentials fail here rather than on the first request
    let ptv = PtvClient::new(config).expect("Failed to create PTV client");

    let state = AppState::new(ptv);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("PTV_LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .expect("PTV_LISTEN_ADDR must be a socket address");

    info!(%addr, "PTV provider listening");
    info!("  GET  /health");
    info!("  GET  /api/nearby?lat=&lon=&max_distance=&max_locations=");
    info!("  GET  /api/departures/:station_id?limit=");
    info!("  GET  /api/suggest?q=");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
