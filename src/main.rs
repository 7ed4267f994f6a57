//! FlagGlobe - a country information aggregator.
//!
//! # API Endpoints
//!
//! - `GET /country/:name` - Look up one country
//! - `GET /compare?first=X&second=Y` - Compare two countries side by side
//! - `GET /quiz` - The static trivia quiz (answers omitted)
//! - `POST /quiz/check` - Score a selected quiz option
//! - `GET /health` - Health check

use std::env;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use flagglobe::aggregation::Aggregator;
use flagglobe::api::{AppState, router};
use flagglobe::data_sources::{RestCountriesClient, WikipediaClient};

/// Default port if not specified via environment variable.
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with environment filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("flagglobe=info".parse()?))
        .init();

    // Load configuration from environment
    let port: u16 = env::var("FLAGGLOBE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    // Base URL overrides, mainly for local stubs
    let facts = match env::var("FLAGGLOBE_FACTS_URL") {
        Ok(url) => RestCountriesClient::with_base_url(&url),
        Err(_) => RestCountriesClient::new(),
    };
    let wikipedia = match env::var("FLAGGLOBE_WIKI_URL") {
        Ok(url) => WikipediaClient::with_base_url(&url),
        Err(_) => WikipediaClient::new(),
    };

    let state = AppState {
        aggregator: Aggregator::with_clients(facts, wikipedia),
    };

    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "FlagGlobe is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
