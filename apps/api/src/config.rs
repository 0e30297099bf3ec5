use anyhow::{Context, Result};

use crate::scoring::similarity::SimilarityMetric;
use crate::scoring::DEFAULT_FUZZY_CUTOFF;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub gemini_api_key: String,
    /// Keys the session cookie signature.
    pub session_secret: String,
    pub session_ttl_secs: u64,
    pub max_upload_bytes: usize,
    pub fuzzy_cutoff: f64,
    pub fuzzy_metric: SimilarityMetric,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let fuzzy_cutoff = optional_env("FUZZY_CUTOFF", DEFAULT_FUZZY_CUTOFF)?;
        if !(0.0..=1.0).contains(&fuzzy_cutoff) {
            anyhow::bail!("FUZZY_CUTOFF must be between 0 and 1, got {fuzzy_cutoff}");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            session_secret: require_env("SESSION_SECRET")?,
            session_ttl_secs: optional_env("SESSION_TTL_SECS", 86_400)?,
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            fuzzy_cutoff,
            fuzzy_metric: optional_env("FUZZY_METRIC", SimilarityMetric::Gestalt)?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}
