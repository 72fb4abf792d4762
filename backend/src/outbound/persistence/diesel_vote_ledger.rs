//! PostgreSQL-backed `VoteLedger` implementation using Diesel.
//!
//! The one-vote-per-user rule rests on the `(publication_id, user_id)`
//! unique constraint; this adapter translates the constraint violation into
//! [`VoteLedgerError::AlreadyVoted`] so the rule holds even when two casts
//! race.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{VoteLedger, VoteLedgerError};
use crate::domain::{PublicationId, UserId, Vote, VoteId};

use super::diesel_basic_error_mapping;
use super::models::{NewVoteRow, VoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{publications, votes};

/// Diesel-backed implementation of the vote ledger port.
#[derive(Clone)]
pub struct DieselVoteLedger {
    pool: DbPool,
}

impl DieselVoteLedger {
    /// Create a new ledger with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoteLedgerError {
    diesel_basic_error_mapping::map_pool_error(error, VoteLedgerError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VoteLedgerError {
    diesel_basic_error_mapping::map_diesel_error(
        error,
        VoteLedgerError::query,
        VoteLedgerError::connection,
    )
}

/// Map cast failures, recognising the duplicate-vote constraint.
fn map_cast_error(error: diesel::result::Error) -> VoteLedgerError {
    match &error {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            VoteLedgerError::already_voted()
        }
        _ => map_diesel_error(error),
    }
}

/// Failure modes inside the cast transaction.
enum CastFailure {
    /// The voted-on publication does not exist.
    PublicationMissing,
    /// A database operation failed.
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for CastFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

/// Convert a stored vote row into a validated domain vote.
fn row_to_vote(row: VoteRow) -> Result<Vote, VoteLedgerError> {
    let id = VoteId::new(row.id)
        .map_err(|err| VoteLedgerError::query(format!("stored vote: {err}")))?;
    let publication_id = PublicationId::new(row.publication_id)
        .map_err(|err| VoteLedgerError::query(format!("stored vote {id}: {err}")))?;
    let user_id = UserId::new(row.user_id)
        .map_err(|err| VoteLedgerError::query(format!("stored vote {id}: {err}")))?;

    Ok(Vote {
        id,
        publication_id,
        user_id,
        grade: row.grade,
    })
}

#[async_trait]
impl VoteLedger for DieselVoteLedger {
    async fn cast(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<Vote, VoteLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewVoteRow {
            publication_id: publication_id.get(),
            user_id: user_id.get(),
            grade,
        };

        // The existence check gives the missing-publication failure
        // precedence over the insert's foreign key error. It cannot exclude
        // a concurrent cast for the same pair; the unique constraint closes
        // that race and is reported as AlreadyVoted.
        let outcome = conn
            .transaction::<VoteRow, CastFailure, _>(|conn| {
                async move {
                    let publication_exists: bool = diesel::select(diesel::dsl::exists(
                        publications::table.find(new_row.publication_id),
                    ))
                    .get_result(conn)
                    .await?;

                    if !publication_exists {
                        return Err(CastFailure::PublicationMissing);
                    }

                    let row = diesel::insert_into(votes::table)
                        .values(&new_row)
                        .returning(VoteRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(row) => row_to_vote(row),
            Err(CastFailure::PublicationMissing) => Err(VoteLedgerError::publication_missing()),
            Err(CastFailure::Diesel(error)) => Err(map_cast_error(error)),
        }
    }

    async fn change(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<Vote, VoteLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            votes::table
                .filter(votes::publication_id.eq(publication_id.get()))
                .filter(votes::user_id.eq(user_id.get())),
        )
        .set(votes::grade.eq(grade))
        .returning(VoteRow::as_returning())
        .get_result::<VoteRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_vote(row),
            None => Err(VoteLedgerError::vote_missing()),
        }
    }

    async fn retract(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
    ) -> Result<Vote, VoteLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::delete(
            votes::table
                .filter(votes::publication_id.eq(publication_id.get()))
                .filter(votes::user_id.eq(user_id.get())),
        )
        .returning(VoteRow::as_returning())
        .get_result::<VoteRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_vote(row),
            None => Err(VoteLedgerError::vote_missing()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn vote_row() -> VoteRow {
        VoteRow {
            id: 11,
            publication_id: 3,
            user_id: 7,
            grade: true,
        }
    }

    fn unique_violation() -> diesel::result::Error {
        diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from(
                "duplicate key value violates unique constraint \
                 \"votes_publication_id_user_id_key\"",
            )),
        )
    }

    #[rstest]
    fn vote_row_converts_to_domain(vote_row: VoteRow) {
        let vote = row_to_vote(vote_row).expect("valid row should convert");

        assert_eq!(vote.id.get(), 11);
        assert_eq!(vote.publication_id.get(), 3);
        assert_eq!(vote.user_id.get(), 7);
        assert!(vote.grade);
    }

    #[rstest]
    fn vote_row_with_invalid_id_is_rejected(mut vote_row: VoteRow) {
        vote_row.id = 0;

        let err = row_to_vote(vote_row).expect_err("invalid id must fail");
        assert!(matches!(err, VoteLedgerError::Query { .. }));
        assert!(err.to_string().contains("stored vote"));
    }

    #[rstest]
    fn unique_violation_maps_to_already_voted() {
        assert_eq!(map_cast_error(unique_violation()), VoteLedgerError::already_voted());
    }

    #[rstest]
    fn other_cast_errors_fall_back_to_query_mapping() {
        let err = map_cast_error(diesel::result::Error::NotFound);
        assert_eq!(err, VoteLedgerError::query("record not found"));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, VoteLedgerError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn cast_failure_wraps_diesel_errors() {
        let failure = CastFailure::from(diesel::result::Error::NotFound);
        assert!(matches!(failure, CastFailure::Diesel(_)));
    }
}
