use super::*;
use actix_rt::System;
use async_trait::async_trait;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{PublicationId, UserId, Vote, VoteId};

/// In-memory ledger holding one vote per `(publication, user)` pair.
///
/// Mirrors the behaviour store adapters must provide: the pair is the key,
/// casting on an occupied pair fails, and mutations on an empty pair fail.
struct InMemoryVoteLedger {
    publications: Vec<PublicationId>,
    votes: Mutex<HashMap<(PublicationId, UserId), Vote>>,
    next_id: Mutex<i32>,
}

impl InMemoryVoteLedger {
    fn with_publications(publications: Vec<PublicationId>) -> Self {
        Self {
            publications,
            votes: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    fn allocate_id(&self) -> Result<VoteId, VoteLedgerError> {
        let mut guard = self.next_id.lock().expect("id counter poisoned");
        let id = VoteId::new(*guard).map_err(|err| VoteLedgerError::query(err.to_string()))?;
        *guard += 1;
        Ok(id)
    }
}

#[async_trait]
impl VoteLedger for InMemoryVoteLedger {
    async fn cast(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<Vote, VoteLedgerError> {
        if !self.publications.contains(&publication_id) {
            return Err(VoteLedgerError::publication_missing());
        }
        let id = self.allocate_id()?;
        let mut guard = self.votes.lock().expect("ledger poisoned");
        if guard.contains_key(&(publication_id, user_id)) {
            return Err(VoteLedgerError::already_voted());
        }
        let vote = Vote {
            id,
            publication_id,
            user_id,
            grade,
        };
        guard.insert((publication_id, user_id), vote);
        Ok(vote)
    }

    async fn change(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
        grade: bool,
    ) -> Result<Vote, VoteLedgerError> {
        let mut guard = self.votes.lock().expect("ledger poisoned");
        match guard.get_mut(&(publication_id, user_id)) {
            Some(vote) => {
                vote.grade = grade;
                Ok(*vote)
            }
            None => Err(VoteLedgerError::vote_missing()),
        }
    }

    async fn retract(
        &self,
        publication_id: PublicationId,
        user_id: UserId,
    ) -> Result<Vote, VoteLedgerError> {
        let mut guard = self.votes.lock().expect("ledger poisoned");
        guard
            .remove(&(publication_id, user_id))
            .ok_or_else(VoteLedgerError::vote_missing)
    }
}

#[fixture]
fn publication_id() -> PublicationId {
    PublicationId::new(1).expect("positive publication id")
}

#[fixture]
fn user_id() -> UserId {
    UserId::new(7).expect("positive user id")
}

#[rstest]
fn ledger_cast_then_change_preserves_vote_identity(publication_id: PublicationId, user_id: UserId) {
    let ledger = InMemoryVoteLedger::with_publications(vec![publication_id]);

    System::new().block_on(async move {
        let cast = ledger
            .cast(publication_id, user_id, true)
            .await
            .expect("first cast succeeds");
        let changed = ledger
            .change(publication_id, user_id, false)
            .await
            .expect("change succeeds");

        assert_eq!(changed.id, cast.id);
        assert_eq!(changed.publication_id, publication_id);
        assert_eq!(changed.user_id, user_id);
        assert!(!changed.grade);
    });
}

#[rstest]
fn ledger_rejects_second_cast_for_same_pair(publication_id: PublicationId, user_id: UserId) {
    let ledger = InMemoryVoteLedger::with_publications(vec![publication_id]);

    System::new().block_on(async move {
        ledger
            .cast(publication_id, user_id, true)
            .await
            .expect("first cast succeeds");
        let err = ledger
            .cast(publication_id, user_id, false)
            .await
            .expect_err("second cast must fail");
        assert_eq!(err, VoteLedgerError::already_voted());
    });
}

#[rstest]
fn ledger_reports_missing_publication_on_cast(user_id: UserId) {
    let ledger = InMemoryVoteLedger::with_publications(Vec::new());
    let unknown = PublicationId::new(99).expect("positive publication id");

    System::new().block_on(async move {
        let err = ledger
            .cast(unknown, user_id, true)
            .await
            .expect_err("cast on unknown publication must fail");
        assert_eq!(err, VoteLedgerError::publication_missing());
    });
}

#[rstest]
fn ledger_retract_removes_vote_and_second_retract_fails(
    publication_id: PublicationId,
    user_id: UserId,
) {
    let ledger = InMemoryVoteLedger::with_publications(vec![publication_id]);

    System::new().block_on(async move {
        let cast = ledger
            .cast(publication_id, user_id, true)
            .await
            .expect("cast succeeds");
        let removed = ledger
            .retract(publication_id, user_id)
            .await
            .expect("retract succeeds");
        assert_eq!(removed, cast);

        let err = ledger
            .retract(publication_id, user_id)
            .await
            .expect_err("second retract must fail");
        assert_eq!(err, VoteLedgerError::vote_missing());

        let err = ledger
            .change(publication_id, user_id, false)
            .await
            .expect_err("change after retract must fail");
        assert_eq!(err, VoteLedgerError::vote_missing());
    });
}
