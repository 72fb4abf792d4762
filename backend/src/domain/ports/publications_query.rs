//! Driving port for publication listing reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ListingOptions, PublicationId, RatedPublication, User};

/// Serializable rated publication payload for driving ports.
///
/// Carries the derived vote aggregates alongside the creator summary. Both
/// aggregates are zero for publications without votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatedPublicationPayload {
    /// Publication identifier.
    #[schema(value_type = i32, example = 1)]
    pub id: PublicationId,
    /// Body text.
    #[schema(example = "First post")]
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Up-votes minus down-votes.
    #[schema(example = 3)]
    pub rating: i64,
    /// Total number of votes.
    #[schema(example = 5)]
    pub vote_count: i64,
    /// The publication's author.
    pub creator: User,
}

impl From<RatedPublication> for RatedPublicationPayload {
    fn from(value: RatedPublication) -> Self {
        Self {
            id: value.id,
            content: value.content.into(),
            created_at: value.created_at,
            rating: value.rating,
            vote_count: value.vote_count,
            creator: value.creator,
        }
    }
}

/// Driving port for publication read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationsQuery: Send + Sync {
    /// List publications with their vote aggregates and creator, ordered and
    /// capped per the supplied options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tribune_backend::domain::ListingOptions;
    /// # use tribune_backend::domain::ports::{FixturePublicationsQuery, PublicationsQuery};
    /// # async fn example() -> Result<(), tribune_backend::domain::Error> {
    /// let query = FixturePublicationsQuery;
    /// let listed = query.list(ListingOptions::default()).await?;
    /// assert!(listed.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    async fn list(&self, options: ListingOptions) -> Result<Vec<RatedPublicationPayload>, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePublicationsQuery;

#[async_trait]
impl PublicationsQuery for FixturePublicationsQuery {
    async fn list(&self, _options: ListingOptions) -> Result<Vec<RatedPublicationPayload>, Error> {
        Ok(Vec::new())
    }
}
