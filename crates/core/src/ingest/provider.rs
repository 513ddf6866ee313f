use crate::config::Settings;
use crate::domain::date_range::DateRange;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

const FEED_PATH: &str = "/neo/rest/v1/feed";

#[async_trait::async_trait]
pub trait FeedClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Raw feed body for the range, or `None` when the feed answered with
    /// anything but 200.
    async fn fetch_feed(&self, range: &DateRange) -> Result<Option<Value>>;
}

#[async_trait::async_trait]
impl<T: FeedClient + ?Sized> FeedClient for Box<T> {
    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    async fn fetch_feed(&self, range: &DateRange) -> Result<Option<Value>> {
        (**self).fetch_feed(range).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpFeedClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.feed_timeout()? {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build feed http client")?;

        Ok(Self {
            http,
            base_url: settings.feed_base_url().to_string(),
            api_key: settings.api_key().to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), FEED_PATH)
    }
}

#[async_trait::async_trait]
impl FeedClient for HttpFeedClient {
    fn provider_name(&self) -> &'static str {
        "nasa_neows"
    }

    async fn fetch_feed(&self, range: &DateRange) -> Result<Option<Value>> {
        tracing::debug!(%range, "requesting NEO feed");

        let res = self
            .http
            .get(self.url())
            .query(&range.query_params(&self.api_key))
            .send()
            .await
            .context("NEO feed request failed")?;

        let status = res.status();
        if status != StatusCode::OK {
            tracing::warn!(http_status = %status, %range, "error fetching NEO feed");
            return Ok(None);
        }

        let text = res
            .text()
            .await
            .context("failed to read NEO feed response")?;
        let body = serde_json::from_str::<Value>(&text)
            .context("NEO feed response is not valid JSON")?;
        Ok(Some(body))
    }
}
