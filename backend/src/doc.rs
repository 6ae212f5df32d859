//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification served by Swagger UI in debug
//! builds. It registers every HTTP endpoint, the shared domain schemas and
//! the session-cookie security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, House, HousePage, HouseStatus, Picture, UserProfile};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::favorites::AddFavoriteRequest;
use crate::inbound::http::houses::{HousePayload, HouseUpdatePayload};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Listings backend API",
        description = "Session-authenticated REST interface for browsing, \
            submitting and saving house listings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::houses::list_houses,
        crate::inbound::http::houses::get_house,
        crate::inbound::http::houses::create_house,
        crate::inbound::http::houses::update_house,
        crate::inbound::http::houses::delete_house,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::add_favorite,
        crate::inbound::http::favorites::remove_favorite,
        crate::inbound::http::user_houses::user_houses,
        crate::inbound::http::feed::homes,
        crate::inbound::http::feed::data,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        House,
        HousePage,
        HouseStatus,
        Picture,
        UserProfile,
        RegisterRequest,
        LoginRequest,
        HousePayload,
        HouseUpdatePayload,
        AddFavoriteRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login and session state"),
        (name = "houses", description = "Listing browse and submission"),
        (name = "favorites", description = "Per-user saved listings"),
        (name = "feed", description = "Upstream listing feed proxy"),
        (name = "health", description = "Probe endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(object)) => {
                assert!(
                    object.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn house_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let house_schema = schemas.get("House").expect("House schema");

        assert_object_schema_has_field(house_schema, "streetAddress");
        assert_object_schema_has_field(house_schema, "homeStatus");
        assert_object_schema_has_field(house_schema, "pictures");
    }

    #[test]
    fn every_registered_path_is_under_the_served_prefixes() {
        let doc = ApiDoc::openapi();
        for path in doc.paths.paths.keys() {
            assert!(
                path.starts_with("/api/") || path.starts_with("/health/"),
                "unexpected path prefix: {path}"
            );
        }
    }
}
