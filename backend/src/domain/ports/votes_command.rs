//! Driving port for vote lifecycle mutations.
//!
//! Covers the full state machine for a `(publication, user)` pair: casting a
//! first vote, changing its grade, and retracting it. Rule violations are
//! reported with fixed detail messages so clients can rely on stable text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, PublicationId, UserId, Vote, VoteId};

/// Detail message when casting while a vote already exists for the pair.
pub const ALREADY_VOTED_MESSAGE: &str = "You have already voted";
/// Detail message when voting on a publication that does not exist.
pub const PUBLICATION_MISSING_MESSAGE: &str = "Publication does not exist";
/// Detail message when changing or retracting a vote that does not exist.
pub const VOTE_MISSING_MESSAGE: &str = "Vote does not exist";

/// Serializable vote payload for driving ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VotePayload {
    /// Vote identifier.
    #[schema(value_type = i32, example = 1)]
    pub id: VoteId,
    /// The publication receiving the vote.
    #[schema(value_type = i32, example = 1)]
    pub publication_id: PublicationId,
    /// The voting user.
    #[schema(value_type = i32, example = 1)]
    pub user_id: UserId,
    /// Vote direction: `true` for up, `false` for down.
    #[schema(example = true)]
    pub grade: bool,
}

impl From<Vote> for VotePayload {
    fn from(value: Vote) -> Self {
        Self {
            id: value.id,
            publication_id: value.publication_id,
            user_id: value.user_id,
            grade: value.grade,
        }
    }
}

/// Driving port for vote write operations.
///
/// Every method runs as a single transactional use-case: the returned payload
/// reflects the committed state, and any rule violation leaves the ledger
/// untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotesCommand: Send + Sync {
    /// Cast a first vote on a publication.
    ///
    /// Fails with [`PUBLICATION_MISSING_MESSAGE`] when the publication does
    /// not exist and [`ALREADY_VOTED_MESSAGE`] when the user already holds a
    /// vote on it, including when a concurrent cast wins the race.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tribune_backend::domain::{PublicationId, UserId};
    /// # use tribune_backend::domain::ports::{FixtureVotesCommand, VotesCommand};
    /// # async fn example() -> Result<(), tribune_backend::domain::Error> {
    /// let command = FixtureVotesCommand;
    /// let publication_id = PublicationId::new(1).expect("positive id");
    /// let user_id = UserId::new(7).expect("positive id");
    /// let vote = command.cast(publication_id, user_id, true).await?;
    /// assert!(vote.grade);
    /// # Ok(())
    /// # }
    /// ```
    async fn cast(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<VotePayload, Error>;

    /// Replace the grade of the user's existing vote on a publication.
    ///
    /// Fails with [`VOTE_MISSING_MESSAGE`] when no vote exists for the pair.
    async fn change(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<VotePayload, Error>;

    /// Retract the user's existing vote, returning the removed row.
    ///
    /// Fails with [`VOTE_MISSING_MESSAGE`] when no vote exists for the pair.
    async fn retract(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
    ) -> Result<VotePayload, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Casting succeeds with a canned vote; changing or retracting reports a
/// missing vote because the fixture stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVotesCommand;

#[async_trait]
impl VotesCommand for FixtureVotesCommand {
    async fn cast(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<VotePayload, Error> {
        let id = VoteId::new(1)
            .map_err(|err| Error::internal(format!("invalid fixture vote id: {err}")))?;
        Ok(VotePayload {
            id,
            publication_id,
            user_id,
            grade,
        })
    }

    async fn change(
        &self,
        _publication_id: PublicationId,
        _user_id: UserId,
        _grade: bool,
    ) -> Result<VotePayload, Error> {
        Err(Error::invalid_request(VOTE_MISSING_MESSAGE))
    }

    async fn retract(
        &self,
        _publication_id: PublicationId,
        _user_id: UserId,
    ) -> Result<VotePayload, Error> {
        Err(Error::invalid_request(VOTE_MISSING_MESSAGE))
    }
}
