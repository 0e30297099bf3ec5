mod admin;
mod advisor;
mod assessment;
mod auth;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod resume;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::GeminiAdvisor;
use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::scoring::ScoringEngine;
use crate::state::AppState;

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

    info!("Starting SkillBridge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed sessions
    let redis = redis::Client::open(config.redis_url.clone())?;
    let sessions = SessionStore::new(
        redis,
        config.session_secret.clone(),
        config.session_ttl_secs,
    );
    info!("Session store initialized (ttl: {}s)", config.session_ttl_secs);

    // Initialize AI advisor
    let llm = GeminiClient::new(config.gemini_api_key.clone());
    let advisor = Arc::new(GeminiAdvisor::new(llm));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize scoring engine
    let scorer = Arc::new(ScoringEngine::with_fuzzy(
        config.fuzzy_cutoff,
        config.fuzzy_metric,
    ));
    info!(
        "Scoring engine tiers: {:?} (fuzzy: {} >= {})",
        scorer.tier_names(),
        config.fuzzy_metric.as_str(),
        config.fuzzy_cutoff
    );

    // Build app state
    let state = AppState {
        db,
        sessions,
        advisor,
        scorer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
