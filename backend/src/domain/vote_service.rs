//! Vote lifecycle domain service.
//!
//! Implements the vote driving port on top of the vote ledger. The ledger's
//! rule violations translate into invalid-request errors with the fixed
//! detail messages clients rely on; everything else surfaces as an opaque
//! internal error.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ALREADY_VOTED_MESSAGE, PUBLICATION_MISSING_MESSAGE, VOTE_MISSING_MESSAGE, VoteLedger,
    VoteLedgerError, VotePayload, VotesCommand,
};
use crate::domain::{Error, PublicationId, UserId};

fn map_ledger_error(error: VoteLedgerError) -> Error {
    match error {
        VoteLedgerError::AlreadyVoted => Error::invalid_request(ALREADY_VOTED_MESSAGE),
        VoteLedgerError::VoteMissing => Error::invalid_request(VOTE_MISSING_MESSAGE),
        VoteLedgerError::PublicationMissing => {
            Error::invalid_request(PUBLICATION_MISSING_MESSAGE)
        }
        VoteLedgerError::Connection { message } => {
            Error::internal(format!("vote ledger unavailable: {message}"))
        }
        VoteLedgerError::Query { message } => {
            Error::internal(format!("vote ledger error: {message}"))
        }
    }
}

/// Vote service implementing the command driving port.
#[derive(Clone)]
pub struct VoteCommandService<L> {
    vote_ledger: Arc<L>,
}

impl<L> VoteCommandService<L> {
    /// Create a new command service with the vote ledger.
    pub fn new(vote_ledger: Arc<L>) -> Self {
        Self { vote_ledger }
    }
}

#[async_trait]
impl<L> VotesCommand for VoteCommandService<L>
where
    L: VoteLedger,
{
    async fn cast(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<VotePayload, Error> {
        let vote = self
            .vote_ledger
            .cast(publication_id, user_id, grade)
            .await
            .map_err(map_ledger_error)?;

        Ok(VotePayload::from(vote))
    }

    async fn change(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<VotePayload, Error> {
        let vote = self
            .vote_ledger
            .change(publication_id, user_id, grade)
            .await
            .map_err(map_ledger_error)?;

        Ok(VotePayload::from(vote))
    }

    async fn retract(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
    ) -> Result<VotePayload, Error> {
        let vote = self
            .vote_ledger
            .retract(publication_id, user_id)
            .await
            .map_err(map_ledger_error)?;

        Ok(VotePayload::from(vote))
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
