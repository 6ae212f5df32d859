//! Dashboard handler for the caller's own listings.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::House;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserHousesQuery {
    search: Option<String>,
}

/// Listings submitted by the caller.
#[utoipa::path(
    get,
    path = "/api/user/houses",
    tags = ["houses"],
    params(("search" = Option<String>, Query, description = "Narrow by address, city or type")),
    responses(
        (status = 200, description = "The caller's listings", body = [House]),
        (status = 401, description = "No session", body = crate::domain::Error)
    )
)]
#[get("/user/houses")]
pub async fn user_houses(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<UserHousesQuery>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty());
    let houses = state.houses_query.list_owned(user, search).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": houses })))
}
