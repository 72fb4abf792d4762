//! Publication data model.
//!
//! A publication is a piece of user-authored content. Identifiers and
//! timestamps are assigned by the store; callers construct a
//! [`NewPublication`] and receive a [`Publication`] back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Validation errors for publication components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationValidationError {
    InvalidId,
    EmptyContent,
}

impl fmt::Display for PublicationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "publication id must be a positive integer"),
            Self::EmptyContent => write!(f, "publication content must not be empty"),
        }
    }
}

impl std::error::Error for PublicationValidationError {}

/// Stable publication identifier assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct PublicationId(i32);

impl PublicationId {
    /// Validate and construct a [`PublicationId`].
    pub fn new(id: i32) -> Result<Self, PublicationValidationError> {
        if id < 1 {
            return Err(PublicationValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Access the underlying integer value.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PublicationId> for i32 {
    fn from(value: PublicationId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for PublicationId {
    type Error = PublicationValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Body text of a publication.
///
/// ## Invariants
/// - Non-empty once trimmed of whitespace; the original input is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Content(String);

impl Content {
    /// Validate and construct [`Content`] from owned input.
    pub fn new(content: impl Into<String>) -> Result<Self, PublicationValidationError> {
        Self::from_owned(content.into())
    }

    fn from_owned(content: String) -> Result<Self, PublicationValidationError> {
        if content.trim().is_empty() {
            return Err(PublicationValidationError::EmptyContent);
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for Content {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Content> for String {
    fn from(value: Content) -> Self {
        value.0
    }
}

impl TryFrom<String> for Content {
    type Error = PublicationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A stored publication.
///
/// # Examples
///
/// ```
/// # use tribune_backend::domain::{Content, NewPublication, UserId};
/// let draft = NewPublication::new(
///     Content::new("First post").expect("non-empty"),
///     UserId::new(1).expect("positive"),
/// );
/// assert_eq!(draft.content.as_ref(), "First post");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Unique identifier assigned on insert.
    pub id: PublicationId,
    /// Body text.
    pub content: Content,
    /// The user who authored the publication.
    pub creator_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a publication.
///
/// The store assigns the identifier and both timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPublication {
    /// Body text.
    pub content: Content,
    /// The user authoring the publication.
    pub creator_id: UserId,
}

impl NewPublication {
    /// Create a draft from validated components.
    pub fn new(content: Content, creator_id: UserId) -> Self {
        Self {
            content,
            creator_id,
        }
    }
}
