//! External listing feed port.
//!
//! The feed endpoints proxy an upstream property API. The port reports the
//! upstream status and body verbatim so handlers can pass both through.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::macros::define_port_error;

define_port_error! {
    /// Failures surfaced by [`ListingFeed`] implementations.
    ListingFeedError {
        /// The upstream did not answer within the deadline.
        Timeout => "listing feed timed out: {message}",
        /// The request never completed.
        Transport => "listing feed transport failure: {message}",
        /// The upstream body was not valid JSON.
        Decode => "listing feed response not understood: {message}",
    }
}

/// One upstream feed response, passed through verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    /// Upstream HTTP status code.
    pub status: u16,
    /// Upstream JSON body.
    pub body: Value,
}

/// Port for fetching pages from the external listing feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingFeed: Send + Sync {
    /// Fetch one feed page. `page` and `limit` are forwarded verbatim as
    /// query parameters.
    async fn fetch(&self, page: &str, limit: &str) -> Result<FeedPage, ListingFeedError>;
}

/// Empty feed used when no upstream is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureListingFeed;

#[async_trait]
impl ListingFeed for FixtureListingFeed {
    async fn fetch(&self, page: &str, limit: &str) -> Result<FeedPage, ListingFeedError> {
        Ok(FeedPage {
            status: 200,
            body: serde_json::json!({
                "listings": [],
                "page": page,
                "limit": limit,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_echoes_requested_window() {
        let page = FixtureListingFeed
            .fetch("3", "25")
            .await
            .expect("fixture fetch succeeds");
        assert_eq!(page.status, 200);
        assert_eq!(page.body["page"], "3");
        assert_eq!(page.body["limit"], "25");
        assert_eq!(page.body["listings"], serde_json::json!([]));
    }
}
