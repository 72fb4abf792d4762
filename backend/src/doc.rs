//! Generated OpenAPI description of the HTTP surface.
//!
//! [`ApiDoc`] collects every handler, request body, and envelope payload the
//! REST API exposes, plus the session-cookie security scheme. Debug builds
//! mount it under `/docs` via Swagger UI; `cargo run --bin openapi-dump`
//! writes the same document for external tooling.

use crate::domain::ports::{PublicationPayload, RatedPublicationPayload, VotePayload};
use crate::domain::{OrderBy, User};
use crate::inbound::http::auth::{LoginDetails, LoginRequest};
use crate::inbound::http::envelope::ApiEnvelope;
use crate::inbound::http::publications::CreatePublicationBody;
use crate::inbound::http::votes::VoteBody;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the session cookie under `components.securitySchemes`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default)
            .add_security_scheme(
                "SessionCookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "session",
                    "Session cookie issued by POST /auth/login.",
                ))),
            );
    }
}

/// OpenAPI document: one entry per handler plus the envelope schemas they
/// answer with.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tribune backend API",
        description = "HTTP interface for publications, per-user votes, and session login."
    ),
    servers(
        (url = "/", description = "Paths resolve against the deployment root")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::publications::create_publication,
        crate::inbound::http::publications::list_publications,
        crate::inbound::http::votes::cast_vote,
        crate::inbound::http::votes::change_vote,
        crate::inbound::http::votes::retract_vote,
        crate::inbound::http::health::readiness,
        crate::inbound::http::health::liveness,
    ),
    components(schemas(
        LoginRequest,
        LoginDetails,
        CreatePublicationBody,
        VoteBody,
        OrderBy,
        User,
        PublicationPayload,
        RatedPublicationPayload,
        VotePayload,
        ApiEnvelope<LoginDetails>,
        ApiEnvelope<PublicationPayload>,
        ApiEnvelope<Vec<RatedPublicationPayload>>,
        ApiEnvelope<VotePayload>,
    )),
    tags(
        (name = "auth", description = "Session login"),
        (name = "publications", description = "Publication creation and rated listing"),
        (name = "votes", description = "Vote lifecycle on publications"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema and path registration.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_properties(schema: &RefOr<Schema>) -> Vec<&str> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().map(String::as_str).collect(),
            _ => panic!("expected an object schema"),
        }
    }

    #[test]
    fn user_schema_lists_its_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_properties(schemas.get("User").expect("User schema"));

        assert!(fields.contains(&"id"));
        assert!(fields.contains(&"username"));
    }

    #[test]
    fn vote_payload_schema_uses_camel_case_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_properties(schemas.get("VotePayload").expect("VotePayload schema"));

        assert!(fields.contains(&"publicationId"));
        assert!(fields.contains(&"userId"));
        assert!(fields.contains(&"grade"));
    }

    #[test]
    fn vote_lifecycle_operations_share_one_path() {
        let doc = ApiDoc::openapi();
        let vote_path = doc
            .paths
            .paths
            .get("/publications/{id}/vote")
            .expect("vote path");

        assert!(vote_path.post.is_some(), "cast operation registered");
        assert!(vote_path.put.is_some(), "change operation registered");
        assert!(vote_path.delete.is_some(), "retract operation registered");
    }

    #[test]
    fn session_cookie_scheme_is_declared() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");

        assert!(
            components.security_schemes.contains_key("SessionCookie"),
            "session cookie security scheme registered"
        );
    }
}
