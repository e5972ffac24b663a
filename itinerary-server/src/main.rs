use std::net::SocketAddr;

use itinerary_server::backend::{BackendClient, BackendConfig, MockBackend};
use itinerary_server::normalize::Normalizer;
use itinerary_server::resolve::{ItineraryBackend, Resolver, ResolverConfig};
use itinerary_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Read an optional numeric setting, failing fast on garbage.
fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().map(|v| {
        v.parse()
            .unwrap_or_else(|_| panic!("{name} must be a whole number of seconds, got {v:?}"))
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut resolver_config = ResolverConfig::default();
    if let Some(secs) = env_u64("RESOLVE_DEADLINE_SECS") {
        resolver_config = resolver_config.with_deadline_secs(secs);
    }

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("BIND_ADDR must be a socket address");

    match std::env::var("MOCK_DATA_DIR") {
        Ok(dir) => {
            info!(%dir, "serving mock backend data");
            let backend = MockBackend::new(&dir).expect("Failed to load mock backend data");
            serve(backend, resolver_config, addr).await;
        }
        Err(_) => {
            let mut backend_config = BackendConfig::default();
            if let Ok(url) = std::env::var("BACKEND_BASE_URL") {
                backend_config = backend_config.with_base_url(url);
            }
            if let Some(secs) = env_u64("BACKEND_TIMEOUT_SECS") {
                backend_config = backend_config.with_timeout(secs);
            }
            info!(base_url = %backend_config.base_url, "using live backend");

            let backend =
                BackendClient::new(backend_config).expect("Failed to create backend client");
            match backend.health().await {
                Ok(body) => info!(response = %body.trim(), "backend reachable"),
                Err(e) => tracing::warn!(error = %e, "backend health check failed; continuing"),
            }
            serve(backend, resolver_config, addr).await;
        }
    }
}

async fn serve<B: ItineraryBackend + 'static>(backend: B, config: ResolverConfig, addr: SocketAddr) {
    let state = AppState::new(Resolver::new(backend, config), Normalizer::default());
    let app = create_router(state);

    info!("Itinerary server listening on http://{addr}");
    info!("  GET /health            - Health check");
    info!("  GET /api/itinerary     - Resolve itineraries");
    info!("  GET /api/line-details  - Look up a transit line");
    info!("  GET /api/line-stops    - Stops along a transit line");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
