pub mod domain;
pub mod ingest;
pub mod tracker;
pub mod views;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_FEED_BASE_URL: &str = "https://api.nasa.gov";

    // NASA's shared rate-limited key; good enough for a handful of lookups.
    pub const DEMO_API_KEY: &str = "DEMO_KEY";

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub nasa_api_key: Option<String>,
        pub feed_base_url: Option<String>,
        pub feed_timeout_secs: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                nasa_api_key: std::env::var("NASA_API_KEY").ok(),
                feed_base_url: std::env::var("NEO_FEED_BASE_URL").ok(),
                feed_timeout_secs: std::env::var("NEO_FEED_TIMEOUT_SECS").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn api_key(&self) -> &str {
            self.nasa_api_key
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEMO_API_KEY)
        }

        pub fn feed_base_url(&self) -> &str {
            self.feed_base_url
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_FEED_BASE_URL)
        }

        /// No timeout unless one is configured explicitly.
        pub fn feed_timeout(&self) -> anyhow::Result<Option<Duration>> {
            let Some(raw) = self.feed_timeout_secs.as_deref() else {
                return Ok(None);
            };
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("NEO_FEED_TIMEOUT_SECS must be an integer (got {raw:?})"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
    }

}
