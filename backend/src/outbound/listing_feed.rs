//! Reqwest-backed listing feed adapter.
//!
//! Fetches `{base}/propertiesfetch` with the window forwarded verbatim and
//! reports the upstream status and JSON body untouched, so the proxy
//! handlers can pass both through.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::domain::ports::{FeedPage, ListingFeed, ListingFeedError};

const FEED_PATH: &str = "propertiesfetch";

/// Listing feed adapter that queries one upstream property API.
pub struct HttpListingFeed {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpListingFeed {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn feed_url(&self) -> Result<Url, ListingFeedError> {
        self.base_url
            .join(FEED_PATH)
            .map_err(|err| ListingFeedError::transport(format!("invalid feed URL: {err}")))
    }
}

fn map_transport_error(error: reqwest::Error) -> ListingFeedError {
    if error.is_timeout() {
        ListingFeedError::timeout(error.to_string())
    } else {
        ListingFeedError::transport(error.to_string())
    }
}

#[async_trait]
impl ListingFeed for HttpListingFeed {
    async fn fetch(&self, page: &str, limit: &str) -> Result<FeedPage, ListingFeedError> {
        let response = self
            .client
            .get(self.feed_url()?)
            .query(&[("page", page), ("limit", limit)])
            .header("x-api-key", self.api_key.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        let body: Value = serde_json::from_slice(body.as_ref())
            .map_err(|err| ListingFeedError::decode(format!("invalid JSON payload: {err}")))?;

        Ok(FeedPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(base: &str) -> HttpListingFeed {
        HttpListingFeed::new(
            Url::parse(base).expect("valid base url"),
            "key".to_owned(),
            Duration::from_secs(10),
        )
        .expect("client builds")
    }

    #[test]
    fn feed_url_appends_the_fetch_path() {
        let url = feed("https://feed.example/zilo/")
            .feed_url()
            .expect("joinable");
        assert_eq!(url.as_str(), "https://feed.example/zilo/propertiesfetch");
    }

    #[test]
    fn feed_url_ignores_a_trailing_segment_without_slash() {
        // Url::join replaces the last segment when the base lacks a slash.
        let url = feed("https://feed.example/zilo").feed_url().expect("joinable");
        assert_eq!(url.as_str(), "https://feed.example/propertiesfetch");
    }
}
