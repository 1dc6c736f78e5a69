use std::time::Duration;

use anyhow::{ensure, Context, Result};

/// Default upper bound on concurrent scoring calls per ranking batch.
pub const DEFAULT_MATCH_CONCURRENCY: usize = 8;
/// Default per-call timeout for the external scorer, in seconds.
pub const DEFAULT_SCORER_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL document store. When unset the service runs on the in-memory store.
    pub database_url: Option<String>,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub match_concurrency: usize,
    pub scorer_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_concurrency = parse_env("MATCH_CONCURRENCY", DEFAULT_MATCH_CONCURRENCY)?;
        ensure!(match_concurrency >= 1, "MATCH_CONCURRENCY must be at least 1");

        let scorer_timeout_secs = parse_env("SCORER_TIMEOUT_SECS", DEFAULT_SCORER_TIMEOUT_SECS)?;
        ensure!(scorer_timeout_secs >= 1, "SCORER_TIMEOUT_SECS must be at least 1");

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_concurrency,
            scorer_timeout: Duration::from_secs(scorer_timeout_secs),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, falling back to `default` when it is absent.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
