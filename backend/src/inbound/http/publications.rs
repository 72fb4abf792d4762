//! Publication endpoints.
//!
//! ```text
//! POST /publications {"content":"First post"}
//! GET  /publications?order_by=rating&desc=true&limit=10
//! ```
//!
//! Creation requires an authenticated session; the listing is public.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::{CreatePublicationRequest, PublicationPayload, RatedPublicationPayload};
use crate::domain::{ApiResult, ListingOptions, OrderBy};
use crate::inbound::http::envelope::ApiEnvelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Success message returned by [`create_publication`].
pub const PUBLICATION_CREATED_MESSAGE: &str = "Publication created successfully.";
/// Success message returned by [`list_publications`].
pub const PUBLICATIONS_LISTED_MESSAGE: &str = "Publications successfully received.";

/// Request body for `POST /publications`.
#[derive(Debug, Deserialize, serde::Serialize, utoipa::ToSchema)]
pub struct CreatePublicationBody {
    /// Body text; must be non-empty once trimmed.
    #[schema(example = "First post")]
    pub content: String,
}

/// Query parameters for `GET /publications`.
///
/// Omitted parameters fall back to the listing defaults: order by rating,
/// ascending, capped at ten rows. An unrecognized `order_by` value fails
/// deserialization and surfaces as a 400 envelope.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Sort key: `rating` or `created_at`.
    pub order_by: Option<OrderBy>,
    /// Sort descending instead of ascending.
    pub desc: Option<bool>,
    /// Maximum rows to return; `0` disables the cap.
    pub limit: Option<u32>,
}

impl From<ListingQuery> for ListingOptions {
    fn from(query: ListingQuery) -> Self {
        let defaults = ListingOptions::default();
        Self {
            order_by: query.order_by.unwrap_or(defaults.order_by),
            desc: query.desc.unwrap_or(defaults.desc),
            limit: query.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Create a publication owned by the logged-in user.
#[utoipa::path(
    post,
    path = "/publications",
    request_body = CreatePublicationBody,
    responses(
        (status = 201, description = "Publication created",
            body = ApiEnvelope<PublicationPayload>),
        (status = 400, description = "Blank content"),
        (status = 403, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["publications"],
    operation_id = "createPublication"
)]
#[post("")]
pub async fn create_publication(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePublicationBody>,
) -> ApiResult<HttpResponse> {
    let creator_id = session.require_user_id()?;
    let publication = state
        .publications
        .create(CreatePublicationRequest {
            content: payload.into_inner().content,
            creator_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(ApiEnvelope::success(
        PUBLICATION_CREATED_MESSAGE,
        publication,
    )))
}

/// List publications with vote aggregates and creator summaries.
///
/// Publicly readable; ordering and row cap come from the query string.
#[utoipa::path(
    get,
    path = "/publications",
    params(ListingQuery),
    responses(
        (status = 200, description = "Ordered listing",
            body = ApiEnvelope<Vec<RatedPublicationPayload>>),
        (status = 400, description = "Unrecognized ordering or malformed query"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["publications"],
    operation_id = "listPublications",
    security([])
)]
#[get("")]
pub async fn list_publications(
    state: web::Data<HttpState>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let listed = state.listings.list(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(ApiEnvelope::success(PUBLICATIONS_LISTED_MESSAGE, listed)))
}

#[cfg(test)]
#[path = "publications_tests.rs"]
mod tests;
