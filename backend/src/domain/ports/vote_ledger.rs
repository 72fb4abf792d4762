//! Port for the vote ledger: one row per user per publication.

use async_trait::async_trait;

use crate::domain::{PublicationId, UserId, Vote, VoteId};

use super::port_error;

port_error! {
    /// Errors raised by vote ledger adapters.
    pub enum VoteLedgerError {
        /// The user already holds a vote on the publication.
        AlreadyVoted =>
            "a vote for this publication already exists",
        /// No vote exists for the `(publication, user)` pair.
        VoteMissing =>
            "no vote exists for this publication",
        /// The voted-on publication does not exist.
        PublicationMissing =>
            "publication does not exist",
        /// Ledger connection could not be established.
        Connection { message: String } =>
            "vote ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "vote ledger query failed: {message}",
    }
}

/// Port for casting, changing, and retracting votes.
///
/// Adapters enforce the one-vote-per-user-per-publication rule and report
/// rule violations through [`VoteLedgerError`] rather than generic query
/// failures, so services can translate them into stable domain errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// Record a new vote.
    ///
    /// Fails with [`VoteLedgerError::PublicationMissing`] when the
    /// publication does not exist and [`VoteLedgerError::AlreadyVoted`] when
    /// the user already voted on it, including when a concurrent cast wins
    /// the race.
    async fn cast(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<Vote, VoteLedgerError>;

    /// Replace the grade of an existing vote, returning the updated row.
    ///
    /// Fails with [`VoteLedgerError::VoteMissing`] when the user holds no
    /// vote on the publication.
    async fn change(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<Vote, VoteLedgerError>;

    /// Delete an existing vote, returning the removed row.
    ///
    /// Fails with [`VoteLedgerError::VoteMissing`] when the user holds no
    /// vote on the publication.
    async fn retract(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
    ) -> Result<Vote, VoteLedgerError>;
}

/// Identifier the fixture assigns to cast votes.
const FIXTURE_VOTE_ID: i32 = 1;

/// Fixture implementation for tests that do not exercise vote persistence.
///
/// Casting succeeds with a canned vote; changing or retracting reports a
/// missing vote because the fixture stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteLedger;

#[async_trait]
impl VoteLedger for FixtureVoteLedger {
    async fn cast(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<Vote, VoteLedgerError> {
        let id =
            VoteId::new(FIXTURE_VOTE_ID).map_err(|err| VoteLedgerError::query(err.to_string()))?;
        Ok(Vote {
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
    ) -> Result<Vote, VoteLedgerError> {
        Err(VoteLedgerError::vote_missing())
    }

    async fn retract(
        &self,
        _publication_id: PublicationId,
        _user_id: UserId,
    ) -> Result<Vote, VoteLedgerError> {
        Err(VoteLedgerError::vote_missing())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn ids() -> (PublicationId, UserId) {
        (
            PublicationId::new(1).expect("positive publication id"),
            UserId::new(1).expect("positive user id"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_cast_returns_canned_vote() {
        let ledger = FixtureVoteLedger;
        let (publication_id, user_id) = ids();

        let vote = ledger
            .cast(publication_id, user_id, true)
            .await
            .expect("fixture cast succeeds");

        assert_eq!(vote.id.get(), FIXTURE_VOTE_ID);
        assert_eq!(vote.publication_id, publication_id);
        assert_eq!(vote.user_id, user_id);
        assert!(vote.grade);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_change_reports_missing_vote() {
        let ledger = FixtureVoteLedger;
        let (publication_id, user_id) = ids();

        let err = ledger
            .change(publication_id, user_id, false)
            .await
            .expect_err("fixture holds no votes");
        assert_eq!(err, VoteLedgerError::vote_missing());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_retract_reports_missing_vote() {
        let ledger = FixtureVoteLedger;
        let (publication_id, user_id) = ids();

        let err = ledger
            .retract(publication_id, user_id)
            .await
            .expect_err("fixture holds no votes");
        assert_eq!(err, VoteLedgerError::vote_missing());
    }

    #[rstest]
    fn already_voted_has_stable_message() {
        let err = VoteLedgerError::already_voted();
        assert_eq!(
            err.to_string(),
            "a vote for this publication already exists"
        );
    }
}
