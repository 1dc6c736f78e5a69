mod config;
mod db;
mod errors;
mod fallback;
mod ideation;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod profiles;
mod proposals;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::ideation::ideator::LlmGigIdeator;
use crate::llm_client::LlmClient;
use crate::matching::orchestrator::MatchOrchestrator;
use crate::matching::scorer::LlmMatchScorer;
use crate::proposals::generator::LlmProposalWriter;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::writes::TracingErrorSink;
use crate::store::{MarketplaceStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentLink API v{}", env!("CARGO_PKG_VERSION"));

    // Document store: PostgreSQL when configured, in-memory otherwise
    let store: Arc<dyn MarketplaceStore> = match &config.database_url {
        Some(url) => Arc::new(PgStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; using the in-memory store (data is lost on restart)");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let matcher = MatchOrchestrator::new(
        Arc::new(LlmMatchScorer(llm.clone())),
        config.match_concurrency,
        config.scorer_timeout,
    );
    info!(
        concurrency = config.match_concurrency,
        timeout_secs = config.scorer_timeout.as_secs(),
        "Match orchestrator configured"
    );

    // Build app state
    let state = AppState {
        store,
        matcher: Arc::new(matcher),
        proposals: Arc::new(LlmProposalWriter(llm.clone())),
        ideator: Arc::new(LlmGigIdeator(llm)),
        write_errors: Arc::new(TracingErrorSink),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web client's origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
