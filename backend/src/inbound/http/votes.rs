//! Vote endpoints.
//!
//! ```text
//! POST   /publications/{id}/vote {"grade":true}
//! PUT    /publications/{id}/vote {"grade":false}
//! DELETE /publications/{id}/vote
//! ```
//!
//! One vote per user per publication: cast creates it, change flips its
//! grade, retract removes it and echoes the removed row. All three require
//! an authenticated session.

use actix_web::{HttpResponse, delete, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::VotePayload;
use crate::domain::{ApiResult, Error, PublicationId};
use crate::inbound::http::envelope::ApiEnvelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Success message returned by [`cast_vote`].
pub const VOTE_CAST_MESSAGE: &str = "Voted successfully.";
/// Success message returned by [`change_vote`].
pub const VOTE_CHANGED_MESSAGE: &str = "Vote has been updated.";
/// Success message returned by [`retract_vote`].
pub const VOTE_RETRACTED_MESSAGE: &str = "Vote has been removed.";

/// Request body for casting or changing a vote.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
pub struct VoteBody {
    /// `true` for an up-vote, `false` for a down-vote.
    #[schema(example = true)]
    pub grade: bool,
}

fn publication_id_from_path(raw: i32) -> Result<PublicationId, Error> {
    PublicationId::new(raw)
        .map_err(|err| Error::invalid_request(format!("invalid publication id: {err}")))
}

/// Cast the logged-in user's vote on a publication.
#[utoipa::path(
    post,
    path = "/publications/{id}/vote",
    params(("id" = i32, Path, description = "Publication identifier")),
    request_body = VoteBody,
    responses(
        (status = 201, description = "Vote cast", body = ApiEnvelope<VotePayload>),
        (status = 400, description = "Publication missing or vote already cast"),
        (status = 403, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["votes"],
    operation_id = "castVote"
)]
#[post("/{id}/vote")]
pub async fn cast_vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<VoteBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let publication_id = publication_id_from_path(path.into_inner())?;
    let vote = state.votes.cast(publication_id, user_id, payload.grade).await?;
    Ok(HttpResponse::Created().json(ApiEnvelope::success(VOTE_CAST_MESSAGE, vote)))
}

/// Replace the grade of the logged-in user's existing vote.
#[utoipa::path(
    put,
    path = "/publications/{id}/vote",
    params(("id" = i32, Path, description = "Publication identifier")),
    request_body = VoteBody,
    responses(
        (status = 200, description = "Vote updated", body = ApiEnvelope<VotePayload>),
        (status = 400, description = "No vote to change"),
        (status = 403, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["votes"],
    operation_id = "changeVote"
)]
#[put("/{id}/vote")]
pub async fn change_vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<VoteBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let publication_id = publication_id_from_path(path.into_inner())?;
    let vote = state
        .votes
        .change(publication_id, user_id, payload.grade)
        .await?;
    Ok(HttpResponse::Ok().json(ApiEnvelope::success(VOTE_CHANGED_MESSAGE, vote)))
}

/// Retract the logged-in user's vote, returning the removed row.
#[utoipa::path(
    delete,
    path = "/publications/{id}/vote",
    params(("id" = i32, Path, description = "Publication identifier")),
    responses(
        (status = 200, description = "Vote removed", body = ApiEnvelope<VotePayload>),
        (status = 400, description = "No vote to remove"),
        (status = 403, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["votes"],
    operation_id = "retractVote"
)]
#[delete("/{id}/vote")]
pub async fn retract_vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let publication_id = publication_id_from_path(path.into_inner())?;
    let vote = state.votes.retract(publication_id, user_id).await?;
    Ok(HttpResponse::Ok().json(ApiEnvelope::success(VOTE_RETRACTED_MESSAGE, vote)))
}

#[cfg(test)]
#[path = "votes_tests.rs"]
mod tests;
