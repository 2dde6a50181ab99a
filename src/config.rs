//! Process configuration.
//!
//! Read once from the environment at startup and passed by `Arc` into every
//! component that needs it; no ambient lookups after boot.

use anyhow::{Context, Result, anyhow};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
    /// Bearer credential for the upstream API.
    pub github_token: String,
    /// Default TTL for cache entries.
    pub cache_ttl: Duration,
    /// Maximum number of live cache entries.
    pub cache_capacity: usize,
    /// Default repository count for user summaries and listings.
    pub max_repositories: usize,
    /// Page ceiling for random repository discovery (clamped to the
    /// upstream's own cap on use).
    pub max_search_pages: u32,
    /// Per-call upstream request timeout.
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; real environments set variables
        // directly.
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 8080)?,
            github_token: std::env::var("GITHUB_TOKEN")
                .context("GITHUB_TOKEN must be set to an upstream API credential")?,
            cache_ttl: Duration::from_millis(env_or("CACHE_TTL_MS", 3_600_000u64)?),
            cache_capacity: env_or("CACHE_CAPACITY", 10_000usize)?,
            max_repositories: env_or("MAX_REPOSITORIES", 10usize)?,
            max_search_pages: env_or("MAX_SEARCH_PAGES", 34u32)?,
            request_timeout: Duration::from_millis(env_or("REQUEST_TIMEOUT_MS", 10_000u64)?),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            github_token: String::new(),
            cache_ttl: Duration::from_millis(3_600_000),
            cache_capacity: 10_000,
            max_repositories: 10,
            max_search_pages: 34,
            request_timeout: Duration::from_millis(10_000),
        }
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|err| anyhow!("invalid value for {name}: {err}")),
        Err(_) => Ok(default),
    }
}
