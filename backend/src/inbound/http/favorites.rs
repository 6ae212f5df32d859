//! Saved-listing handlers.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::House;
use crate::domain::ports::{ADDED_TO_FAVORITES, HOUSE_NOT_FOUND, REMOVED_FROM_FAVORITES};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message returned when a favourite request names no listing.
pub const HOUSE_ID_REQUIRED: &str = "House ID is required";

/// Body for saving a listing.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    /// Listing to save.
    house_id: Option<String>,
}

/// Query for unsaving a listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoveFavoriteQuery {
    house_id: Option<String>,
}

fn parse_house_id(raw: Option<&str>) -> Result<Uuid, Error> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::invalid_request(HOUSE_ID_REQUIRED))?;
    Uuid::parse_str(raw).map_err(|_| Error::not_found(HOUSE_NOT_FOUND))
}

/// The caller's saved listings.
#[utoipa::path(
    get,
    path = "/api/favorites",
    tags = ["favorites"],
    responses(
        (status = 200, description = "Saved listings", body = [House]),
        (status = 401, description = "No session", body = Error)
    )
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let houses = state.favorites_query.list(user).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": houses })))
}

/// Save a listing.
#[utoipa::path(
    post,
    path = "/api/favorites",
    tags = ["favorites"],
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Listing saved", body = House),
        (status = 400, description = "Missing id or already saved", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 404, description = "No such listing", body = Error)
    )
)]
#[post("/favorites")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<AddFavoriteRequest>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let house_id = parse_house_id(body.house_id.as_deref())?;
    let house = state.favorites_command.add(user, house_id).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": ADDED_TO_FAVORITES,
        "data": house,
    })))
}

/// Unsave a listing. Succeeds even when it was never saved.
#[utoipa::path(
    delete,
    path = "/api/favorites",
    tags = ["favorites"],
    params(("houseId" = String, Query, description = "Listing to unsave")),
    responses(
        (status = 200, description = "Listing unsaved"),
        (status = 400, description = "Missing id", body = Error),
        (status = 401, description = "No session", body = Error)
    )
)]
#[delete("/favorites")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RemoveFavoriteQuery>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let house_id = parse_house_id(query.house_id.as_deref())?;
    state.favorites_command.remove(user, house_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": REMOVED_FROM_FAVORITES })))
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    use super::*;
    use crate::domain::UserId;
    use crate::domain::ports::ALREADY_FAVORITE;
    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};

    fn favorites_app(
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
            .wrap(test_session_middleware())
            .service(list_favorites)
            .service(add_favorite)
            .service(remove_favorite)
            .service(crate::inbound::http::houses::list_houses)
            .route(
                "/test/login",
                web::post().to(|session: SessionContext| async move {
                    session.persist_user(UserId::new(Uuid::new_v4()))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
    }

    async fn login(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Cookie<'static> {
        let res = test::call_service(
            app,
            test::TestRequest::post().uri("/test/login").to_request(),
        )
        .await;
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    async fn first_house_id(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> String {
        let res =
            test::call_service(app, test::TestRequest::get().uri("/houses").to_request()).await;
        let body: Value = test::read_body_json(res).await;
        body["data"][0]["id"].as_str().expect("id").to_owned()
    }

    #[actix_web::test]
    async fn endpoints_require_a_session() {
        let app = test::init_service(favorites_app(fixture_state())).await;
        for request in [
            test::TestRequest::get().uri("/favorites").to_request(),
            test::TestRequest::post()
                .uri("/favorites")
                .set_json(json!({ "houseId": Uuid::new_v4() }))
                .to_request(),
            test::TestRequest::delete()
                .uri(&format!("/favorites?houseId={}", Uuid::new_v4()))
                .to_request(),
        ] {
            let res = test::call_service(&app, request).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn save_list_and_unsave_round_trips() {
        let app = test::init_service(favorites_app(fixture_state())).await;
        let cookie = login(&app).await;
        let house_id = first_house_id(&app).await;

        let add_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/favorites")
                .cookie(cookie.clone())
                .set_json(json!({ "houseId": house_id }))
                .to_request(),
        )
        .await;
        assert_eq!(add_res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(add_res).await;
        assert_eq!(body["message"], ADDED_TO_FAVORITES);
        assert_eq!(body["data"]["id"], house_id.as_str());

        let list_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/favorites")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(list_res).await;
        assert_eq!(body["data"].as_array().expect("array").len(), 1);

        let remove_res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/favorites?houseId={house_id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(remove_res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(remove_res).await;
        assert_eq!(body["message"], REMOVED_FROM_FAVORITES);

        let list_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/favorites")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(list_res).await;
        assert!(body["data"].as_array().expect("array").is_empty());
    }

    #[actix_web::test]
    async fn double_save_is_rejected() {
        let app = test::init_service(favorites_app(fixture_state())).await;
        let cookie = login(&app).await;
        let house_id = first_house_id(&app).await;
        for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/favorites")
                    .cookie(cookie.clone())
                    .set_json(json!({ "houseId": house_id }))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), expected);
            if expected == StatusCode::BAD_REQUEST {
                let body: Value = test::read_body_json(res).await;
                assert_eq!(body["message"], ALREADY_FAVORITE);
            }
        }
    }

    #[actix_web::test]
    async fn missing_house_id_is_rejected() {
        let app = test::init_service(favorites_app(fixture_state())).await;
        let cookie = login(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/favorites")
                .cookie(cookie.clone())
                .set_json(json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], HOUSE_ID_REQUIRED);

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/favorites")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unsave_is_idempotent() {
        let app = test::init_service(favorites_app(fixture_state())).await;
        let cookie = login(&app).await;
        let house_id = first_house_id(&app).await;
        for _ in 0..2 {
            let res = test::call_service(
                &app,
                test::TestRequest::delete()
                    .uri(&format!("/favorites?houseId={house_id}"))
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK);
        }
    }
}
