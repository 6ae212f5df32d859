//! Listing browse and submission handlers.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use futures_util::StreamExt;
use pagination::PageParams;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::HOUSE_NOT_FOUND;
use crate::domain::{Error, House, HouseFilter, HousePage, HouseStatus, HouseUpdate, NewHouse};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::multipart::collect_house_submission;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message returned when a creation payload lacks required fields.
pub const MISSING_FIELDS: &str = "Missing required fields";

/// Message returned after deleting a listing.
pub const HOUSE_DELETED: &str = "House deleted successfully";

/// Largest accepted JSON body for listing submissions.
const MAX_JSON_BODY: usize = 256 * 1024;

/// Browse query parameters.
///
/// Everything arrives as text so malformed numbers produce the API's own
/// 400 payload instead of a framework error.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseListQuery {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
    status: Option<String>,
    /// Alias for `status` used by older clients.
    home_status: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    bedrooms: Option<String>,
    bathrooms: Option<String>,
    exclude: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(field: &str, value: Option<&str>) -> Result<Option<T>, Error> {
    match value {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            Error::invalid_request(format!("{field} must be a number"))
                .with_details(json!({ "field": field }))
        }),
    }
}

fn parse_status(value: Option<&str>) -> Result<Option<HouseStatus>, Error> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<HouseStatus>()
            .map(Some)
            .map_err(|error| Error::invalid_request(error.to_string())),
    }
}

impl HouseListQuery {
    fn page_params(&self) -> Result<PageParams, Error> {
        PageParams::from_query(non_blank(self.page.as_ref()), non_blank(self.limit.as_ref()))
            .map_err(|error| Error::invalid_request(error.to_string()))
    }

    fn filter(&self) -> Result<HouseFilter, Error> {
        let status_token = non_blank(self.status.as_ref()).or(non_blank(self.home_status.as_ref()));
        let exclude = match non_blank(self.exclude.as_ref()) {
            None => None,
            Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| {
                Error::invalid_request("exclude must be a valid house id")
                    .with_details(json!({ "field": "exclude" }))
            })?),
        };
        Ok(HouseFilter {
            search: non_blank(self.search.as_ref()).map(str::to_owned),
            status: parse_status(status_token)?,
            min_price: parse_number("minPrice", non_blank(self.min_price.as_ref()))?,
            max_price: parse_number("maxPrice", non_blank(self.max_price.as_ref()))?,
            bedrooms: parse_number("bedrooms", non_blank(self.bedrooms.as_ref()))?,
            bathrooms: parse_number("bathrooms", non_blank(self.bathrooms.as_ref()))?,
            exclude,
        })
    }
}

/// Listing fields accepted on create, from JSON or multipart form text.
#[derive(Debug, Default, PartialEq, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HousePayload {
    /// External listing number.
    pub(crate) zpid: Option<i64>,
    /// Street number and name.
    pub(crate) street_address: Option<String>,
    /// City name.
    pub(crate) city: Option<String>,
    /// State or region code.
    pub(crate) state: Option<String>,
    /// Postal code.
    pub(crate) zipcode: Option<String>,
    /// Neighbourhood label.
    pub(crate) neighborhood: Option<String>,
    /// Community label.
    pub(crate) community: Option<String>,
    /// Subdivision label.
    pub(crate) subdivision: Option<String>,
    /// Bedroom count.
    pub(crate) bedrooms: Option<i32>,
    /// Bathroom count.
    pub(crate) bathrooms: Option<i32>,
    /// Asking price.
    pub(crate) price: Option<f64>,
    /// Construction year.
    pub(crate) year_built: Option<i32>,
    /// Interior area in square feet.
    pub(crate) living_area: Option<i32>,
    /// Longitude of the property.
    pub(crate) longitude: Option<f64>,
    /// Latitude of the property.
    pub(crate) latitude: Option<f64>,
    /// Marketing status token.
    pub(crate) status: Option<String>,
    /// Alias for `status`.
    pub(crate) home_status: Option<String>,
    /// Property type label.
    pub(crate) home_type: Option<String>,
    /// Marketing description.
    pub(crate) description: Option<String>,
    /// ISO currency code.
    pub(crate) currency: Option<String>,
    /// ISO date the listing was posted.
    pub(crate) date_posted: Option<String>,
}

impl HousePayload {
    fn into_new_house(self) -> Result<NewHouse, Error> {
        let street_address = self.street_address.unwrap_or_default().trim().to_owned();
        let city = self.city.unwrap_or_default().trim().to_owned();
        let state = self.state.unwrap_or_default().trim().to_owned();
        let zipcode = self.zipcode.unwrap_or_default().trim().to_owned();
        let complete = !street_address.is_empty()
            && !city.is_empty()
            && !state.is_empty()
            && !zipcode.is_empty()
            && self.price.is_some()
            && self.bedrooms.is_some()
            && self.bathrooms.is_some();
        if !complete {
            return Err(Error::invalid_request(MISSING_FIELDS));
        }
        let status_token = self.status.or(self.home_status);
        let status = parse_status(non_blank(status_token.as_ref()))?.unwrap_or_default();
        Ok(NewHouse {
            zpid: self.zpid,
            street_address,
            city,
            state,
            zipcode,
            neighborhood: self.neighborhood,
            community: self.community,
            subdivision: self.subdivision,
            bedrooms: self.bedrooms.unwrap_or_default(),
            bathrooms: self.bathrooms.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            year_built: self.year_built.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
            latitude: self.latitude.unwrap_or_default(),
            status,
            home_type: self.home_type.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            living_area: self.living_area.unwrap_or_default(),
            currency: self.currency.unwrap_or_else(|| "USD".to_owned()),
            date_posted: self.date_posted,
        })
    }
}

/// Partial update accepted on PUT.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseUpdatePayload {
    /// Replacement external listing number.
    zpid: Option<i64>,
    /// Replacement street address.
    street_address: Option<String>,
    /// Replacement city.
    city: Option<String>,
    /// Replacement state.
    state: Option<String>,
    /// Replacement postal code.
    zipcode: Option<String>,
    /// Replacement neighbourhood label.
    neighborhood: Option<String>,
    /// Replacement community label.
    community: Option<String>,
    /// Replacement subdivision label.
    subdivision: Option<String>,
    /// Replacement bedroom count.
    bedrooms: Option<i32>,
    /// Replacement bathroom count.
    bathrooms: Option<i32>,
    /// Replacement price.
    price: Option<f64>,
    /// Replacement construction year.
    year_built: Option<i32>,
    /// Replacement interior area.
    living_area: Option<i32>,
    /// Replacement longitude.
    longitude: Option<f64>,
    /// Replacement latitude.
    latitude: Option<f64>,
    /// Replacement status token.
    status: Option<String>,
    /// Alias for `status`.
    home_status: Option<String>,
    /// Replacement property type.
    home_type: Option<String>,
    /// Replacement description.
    description: Option<String>,
    /// Replacement currency code.
    currency: Option<String>,
    /// Replacement posting date.
    date_posted: Option<String>,
}

impl HouseUpdatePayload {
    fn into_update(self) -> Result<HouseUpdate, Error> {
        let status_token = self.status.or(self.home_status);
        let status = parse_status(non_blank(status_token.as_ref()))?;
        Ok(HouseUpdate {
            zpid: self.zpid,
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zipcode: self.zipcode,
            neighborhood: self.neighborhood,
            community: self.community,
            subdivision: self.subdivision,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            price: self.price,
            year_built: self.year_built,
            longitude: self.longitude,
            latitude: self.latitude,
            status,
            home_type: self.home_type,
            description: self.description,
            living_area: self.living_area,
            currency: self.currency,
            date_posted: self.date_posted,
        })
    }
}

/// Parse a listing id from the path.
///
/// Malformed ids map to 404 rather than 400: to clients a garbage id and an
/// unknown id are the same missing resource.
fn parse_house_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| Error::not_found(HOUSE_NOT_FOUND))
}

/// Browse listings.
#[utoipa::path(
    get,
    path = "/api/houses",
    tags = ["houses"],
    security([]),
    responses(
        (status = 200, description = "One page of listings", body = HousePage),
        (status = 400, description = "Malformed filter value", body = Error)
    )
)]
#[get("/houses")]
pub async fn list_houses(
    state: web::Data<HttpState>,
    query: web::Query<HouseListQuery>,
) -> ApiResult<HttpResponse> {
    let page = query.page_params()?;
    let filter = query.filter()?;
    let result = state.houses_query.list(&filter, page).await?;
    Ok(HttpResponse::Ok().json(json!({
        "data": result.houses,
        "pagination": result.pagination,
    })))
}

/// Fetch a single listing.
#[utoipa::path(
    get,
    path = "/api/houses/{id}",
    tags = ["houses"],
    security([]),
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "The listing", body = House),
        (status = 404, description = "No such listing", body = Error)
    )
)]
#[get("/houses/{id}")]
pub async fn get_house(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_house_id(&path)?;
    let house = state.houses_query.get(id).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": house })))
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

async fn read_json_payload(mut payload: web::Payload) -> Result<HousePayload, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|error| {
            Error::invalid_request(format!("failed to read request body: {error}"))
        })?;
        if body.len() + chunk.len() > MAX_JSON_BODY {
            return Err(Error::invalid_request("request body too large"));
        }
        body.extend_from_slice(&chunk);
    }
    serde_json::from_slice(&body)
        .map_err(|error| Error::invalid_request(format!("invalid JSON body: {error}")))
}

/// Submit a listing, as JSON or as a multipart form with images.
#[utoipa::path(
    post,
    path = "/api/houses",
    tags = ["houses"],
    request_body = HousePayload,
    responses(
        (status = 201, description = "Listing created", body = House),
        (status = 400, description = "Incomplete payload or duplicate zpid", body = Error),
        (status = 401, description = "No session", body = Error)
    )
)]
#[post("/houses")]
pub async fn create_house(
    req: HttpRequest,
    payload: web::Payload,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let (fields, images) = if is_multipart(&req) {
        collect_house_submission(Multipart::new(req.headers(), payload)).await?
    } else {
        (read_json_payload(payload).await?, Vec::new())
    };
    let house = fields.into_new_house()?;
    let created = state.houses_command.create(owner, house, images).await?;
    Ok(HttpResponse::Created().json(json!({ "data": created })))
}

/// Update a listing the caller owns.
#[utoipa::path(
    put,
    path = "/api/houses/{id}",
    tags = ["houses"],
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = HouseUpdatePayload,
    responses(
        (status = 200, description = "Updated listing", body = House),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such listing", body = Error)
    )
)]
#[put("/houses/{id}")]
pub async fn update_house(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Json<HouseUpdatePayload>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_house_id(&path)?;
    let changes = body.into_inner().into_update()?;
    let updated = state.houses_command.update(owner, id, changes).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": updated })))
}

/// Delete a listing the caller owns.
#[utoipa::path(
    delete,
    path = "/api/houses/{id}",
    tags = ["houses"],
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing deleted"),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such listing", body = Error)
    )
)]
#[delete("/houses/{id}")]
pub async fn delete_house(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_house_id(&path)?;
    state.houses_command.delete(owner, id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": HOUSE_DELETED })))
}
