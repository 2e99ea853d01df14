use std::time::Duration;

use async_trait::async_trait;

use crate::error::FeedError;
use crate::models::{FeedDocument, FeedEntry};
use crate::settings::FeedSettings;

/// A periodically polled channel that yields its most recent row.
#[async_trait]
pub trait FeedSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_latest(&self) -> Result<FeedEntry, FeedError>;
}

/// Bound a fetch by `timeout`. The in-flight request is dropped on expiry.
pub async fn fetch_with_timeout(
    source: &dyn FeedSource,
    timeout: Duration,
) -> Result<FeedEntry, FeedError> {
    tokio::time::timeout(timeout, source.fetch_latest())
        .await
        .map_err(|_| FeedError::Timeout(timeout))?
}

/// ThingSpeak channel read through its public JSON API.
pub struct ThingSpeakFeed {
    name: String,
    url: String,
    read_key: String,
    client: reqwest::Client,
}

impl ThingSpeakFeed {
    pub fn new(name: impl Into<String>, settings: &FeedSettings) -> Self {
        Self {
            name: name.into(),
            url: format!(
                "{}/channels/{}/feeds.json",
                settings.base_url.trim_end_matches('/'),
                settings.channel_id
            ),
            read_key: settings.read_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for ThingSpeakFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_latest(&self) -> Result<FeedEntry, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("api_key", self.read_key.as_str()), ("results", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_latest(&body)
    }
}

/// Decode a feed document and take its newest entry.
pub fn parse_latest(body: &[u8]) -> Result<FeedEntry, FeedError> {
    let document: FeedDocument =
        serde_json::from_slice(body).map_err(|err| FeedError::Malformed(err.to_string()))?;
    document
        .into_latest()
        .ok_or_else(|| FeedError::Malformed("feed has no entries".into()))
}
