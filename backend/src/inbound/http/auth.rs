//! Registration, login, logout and profile handlers.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, NewRegistration, UserProfile};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message returned when registration input is incomplete.
pub const MISSING_FIELDS: &str = "Missing required fields";

/// Message returned on successful registration.
pub const USER_CREATED: &str = "User created successfully";

/// Registration request body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name.
    name: Option<String>,
    /// Login email.
    email: Option<String>,
    /// Plaintext password.
    password: Option<String>,
}

/// Login request body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Login email.
    email: Option<String>,
    /// Plaintext password.
    password: Option<String>,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tags = ["auth"],
    security([]),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserProfile),
        (status = 400, description = "Missing fields or email already registered", body = Error)
    )
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let registration = NewRegistration::try_from_parts(
        body.name.as_deref().unwrap_or_default(),
        body.email.as_deref().unwrap_or_default(),
        body.password.unwrap_or_default(),
    )
    .map_err(|_| Error::invalid_request(MISSING_FIELDS))?;
    let profile = state.auth.register(registration).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": USER_CREATED,
        "data": profile,
    })))
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tags = ["auth"],
    security([]),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = UserProfile),
        (status = 401, description = "Invalid email or password", body = Error)
    )
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        body.email.as_deref().unwrap_or_default(),
        body.password.unwrap_or_default(),
    )
    .map_err(|_| Error::unauthorized(crate::domain::ports::BAD_CREDENTIALS))?;
    let profile = state.auth.login(&credentials).await?;
    session.persist_user(profile.id)?;
    Ok(HttpResponse::Ok().json(json!({ "data": profile })))
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tags = ["auth"],
    responses((status = 204, description = "Session removed"))
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// The profile behind the current session.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tags = ["auth"],
    responses(
        (status = 200, description = "Current profile", body = UserProfile),
        (status = 401, description = "No session", body = Error)
    )
)]
#[get("/auth/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let profile = state.auth.profile(user).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": profile })))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};

    fn auth_app(
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
            .service(register)
            .service(login)
            .service(logout)
            .service(me)
    }

    fn register_body() -> Value {
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hunter2",
        })
    }

    #[actix_web::test]
    async fn register_returns_created_profile() {
        let app = test::init_service(auth_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/register")
                .set_json(register_body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], USER_CREATED);
        assert_eq!(body["data"]["email"], "ada@example.com");
        assert!(body["data"].get("password").is_none());
    }

    #[actix_web::test]
    async fn register_rejects_incomplete_input() {
        let app = test::init_service(auth_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/register")
                .set_json(json!({ "email": "ada@example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], MISSING_FIELDS);
    }

    #[actix_web::test]
    async fn register_rejects_duplicate_email() {
        let app = test::init_service(auth_app(fixture_state())).await;
        for _ in 0..2 {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/auth/register")
                    .set_json(register_body())
                    .to_request(),
            )
            .await;
            if res.status() == StatusCode::CREATED {
                continue;
            }
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["message"], "User with this email already exists");
            return;
        }
        panic!("second registration should have been rejected");
    }

    #[actix_web::test]
    async fn login_sets_session_cookie_and_me_round_trips() {
        let app = test::init_service(auth_app(fixture_state())).await;
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/register")
                .set_json(register_body())
                .to_request(),
        )
        .await;

        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "email": "ada@example.com", "password": "hunter2" }))
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();
        let body: Value = test::read_body_json(login_res).await;
        assert_eq!(body["data"]["name"], "Ada");

        let me_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(me_res).await;
        assert_eq!(body["data"]["email"], "ada@example.com");
    }

    #[actix_web::test]
    async fn login_rejects_bad_password() {
        let app = test::init_service(auth_app(fixture_state())).await;
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/register")
                .set_json(register_body())
                .to_request(),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "email": "ada@example.com", "password": "wrong" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[actix_web::test]
    async fn login_with_missing_fields_is_unauthorised() {
        let app = test::init_service(auth_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn me_without_session_is_unauthorised() {
        let app = test::init_service(auth_app(fixture_state())).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/auth/me").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_invalidates_the_session() {
        let app = test::init_service(auth_app(fixture_state())).await;
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/register")
                .set_json(register_body())
                .to_request(),
        )
        .await;
        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "email": "ada@example.com", "password": "hunter2" }))
                .to_request(),
        )
        .await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let logout_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
    }
}
