//! External listing feed proxy handlers.
//!
//! `/homes` and `/data` forward to the upstream property API and pass its
//! status and body through untouched; only transport-level failures are
//! rewritten into this API's error shape.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::ListingFeedError;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned when the upstream feed does not answer in time.
pub const FEED_TIMED_OUT: &str = "Listing feed timed out";

/// Feed query parameters, forwarded verbatim.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedQuery {
    page: Option<String>,
    limit: Option<String>,
}

fn map_feed_error(feed_error: ListingFeedError) -> Error {
    match feed_error {
        ListingFeedError::Timeout { message } => {
            error!(%message, "listing feed timed out");
            Error::service_unavailable(FEED_TIMED_OUT)
        }
        ListingFeedError::Transport { message } => {
            error!(%message, "listing feed transport failure");
            Error::internal("listing feed request failed")
        }
        ListingFeedError::Decode { message } => {
            error!(%message, "listing feed returned malformed JSON");
            Error::internal("listing feed response not understood")
        }
    }
}

async fn proxy_feed(state: &HttpState, page: &str, limit: &str) -> ApiResult<HttpResponse> {
    let feed_page = state.feed.fetch(page, limit).await.map_err(map_feed_error)?;
    let status = StatusCode::from_u16(feed_page.status)
        .map_err(|_| Error::internal("listing feed returned an unknown status code"))?;
    Ok(HttpResponse::build(status).json(feed_page.body))
}

/// Browse upstream listings, twenty per page by default.
#[utoipa::path(
    get,
    path = "/api/homes",
    tags = ["feed"],
    security([]),
    responses(
        (status = 200, description = "Upstream feed page passed through"),
        (status = 503, description = "Upstream timed out", body = Error)
    )
)]
#[get("/homes")]
pub async fn homes(
    state: web::Data<HttpState>,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    proxy_feed(
        &state,
        query.page.as_deref().unwrap_or("1"),
        query.limit.as_deref().unwrap_or("20"),
    )
    .await
}

/// Sample upstream listings, ten per page by default.
#[utoipa::path(
    get,
    path = "/api/data",
    tags = ["feed"],
    security([]),
    responses(
        (status = 200, description = "Upstream feed page passed through"),
        (status = 503, description = "Upstream timed out", body = Error)
    )
)]
#[get("/data")]
pub async fn data(
    state: web::Data<HttpState>,
    query: web::Query<FeedQuery>,
) -> ApiResult<HttpResponse> {
    proxy_feed(
        &state,
        query.page.as_deref().unwrap_or("1"),
        query.limit.as_deref().unwrap_or("10"),
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{FeedPage, MockListingFeed};
    use crate::inbound::http::test_utils::fixture_state;

    fn feed_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .service(homes)
            .service(data)
    }

    fn state_with_feed(feed: MockListingFeed) -> HttpState {
        let mut state = fixture_state();
        state.feed = Arc::new(feed);
        state
    }

    #[actix_web::test]
    async fn homes_defaults_to_twenty_per_page() {
        let mut feed = MockListingFeed::new();
        feed.expect_fetch()
            .withf(|page, limit| page == "1" && limit == "20")
            .returning(|page, limit| {
                Ok(FeedPage {
                    status: 200,
                    body: json!({ "page": page, "limit": limit }),
                })
            });
        let app = test::init_service(feed_app(state_with_feed(feed))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/homes").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["limit"], "20");
    }

    #[actix_web::test]
    async fn data_defaults_to_ten_per_page() {
        let mut feed = MockListingFeed::new();
        feed.expect_fetch()
            .withf(|page, limit| page == "1" && limit == "10")
            .returning(|_, _| {
                Ok(FeedPage {
                    status: 200,
                    body: json!({ "ok": true }),
                })
            });
        let app = test::init_service(feed_app(state_with_feed(feed))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/data").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn window_parameters_are_forwarded_verbatim() {
        let mut feed = MockListingFeed::new();
        feed.expect_fetch()
            .withf(|page, limit| page == "7" && limit == "3")
            .returning(|_, _| {
                Ok(FeedPage {
                    status: 200,
                    body: json!({ "ok": true }),
                })
            });
        let app = test::init_service(feed_app(state_with_feed(feed))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/homes?page=7&limit=3")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn upstream_status_and_body_pass_through() {
        let mut feed = MockListingFeed::new();
        feed.expect_fetch().returning(|_, _| {
            Ok(FeedPage {
                status: 429,
                body: json!({ "error": "rate limited" }),
            })
        });
        let app = test::init_service(feed_app(state_with_feed(feed))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/homes").to_request()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "rate limited");
    }

    #[actix_web::test]
    async fn timeouts_become_service_unavailable() {
        let mut feed = MockListingFeed::new();
        feed.expect_fetch()
            .returning(|_, _| Err(ListingFeedError::timeout("10s elapsed")));
        let app = test::init_service(feed_app(state_with_feed(feed))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/homes").to_request()).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], FEED_TIMED_OUT);
    }

    #[actix_web::test]
    async fn transport_failures_are_redacted_internal_errors() {
        let mut feed = MockListingFeed::new();
        feed.expect_fetch()
            .returning(|_, _| Err(ListingFeedError::transport("connection refused")));
        let app = test::init_service(feed_app(state_with_feed(feed))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/homes").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
