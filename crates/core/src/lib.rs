pub mod cache;
pub mod domain;
pub mod error;
pub mod overview;
pub mod sanitize;
pub mod service;
pub mod signals;
pub mod storage;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    const DEFAULT_CACHE_TTL_SECS: u64 = 300;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub database_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub overview_cache_ttl: Duration,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let ttl_secs = match std::env::var("OVERVIEW_CACHE_TTL_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("OVERVIEW_CACHE_TTL_SECS is not a number: {s}"))?,
                Err(_) => DEFAULT_CACHE_TTL_SECS,
            };

            Ok(Self {
                database_url: std::env::var("DATABASE_URL").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                overview_cache_ttl: Duration::from_secs(ttl_secs),
            })
        }

        pub fn require_database_url(&self) -> anyhow::Result<&str> {
            self.database_url
                .as_deref()
                .context("DATABASE_URL is required")
        }
    }
}
