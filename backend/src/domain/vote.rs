//! Vote data model.
//!
//! Each user holds at most one vote per publication. The vote's `grade`
//! records its direction: `true` is an up-vote contributing `+1` to the
//! publication's rating, `false` a down-vote contributing `-1`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::publication::PublicationId;
use super::user::UserId;

/// Validation errors for vote components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteValidationError {
    InvalidId,
}

impl fmt::Display for VoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "vote id must be a positive integer"),
        }
    }
}

impl std::error::Error for VoteValidationError {}

/// Stable vote identifier assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct VoteId(i32);

impl VoteId {
    /// Validate and construct a [`VoteId`].
    pub fn new(id: i32) -> Result<Self, VoteValidationError> {
        if id < 1 {
            return Err(VoteValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Access the underlying integer value.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<VoteId> for i32 {
    fn from(value: VoteId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for VoteId {
    type Error = VoteValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user's vote on a publication.
///
/// ## Invariants
/// - A `(publication_id, user_id)` pair identifies at most one vote; the
///   store enforces this with a unique constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    /// Unique identifier assigned on insert.
    pub id: VoteId,
    /// The publication receiving the vote.
    pub publication_id: PublicationId,
    /// The voting user.
    pub user_id: UserId,
    /// Vote direction: `true` for up, `false` for down.
    pub grade: bool,
}
