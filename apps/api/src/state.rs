use std::sync::Arc;

use sqlx::PgPool;

use crate::advisor::CareerAdvisor;
use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::scoring::ScoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub sessions: SessionStore,
    /// Pluggable AI collaborator. Default: GeminiAdvisor.
    pub advisor: Arc<dyn CareerAdvisor>,
    pub scorer: Arc<ScoringEngine>,
    pub config: Config,
}
