//! Driving port for publication mutations.
//!
//! Inbound adapters resolve the authenticated user, then call this port with
//! the payload content; the implementation validates and persists it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Publication, PublicationId, UserId};

/// Serializable publication payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicationPayload {
    /// Publication identifier.
    #[schema(value_type = i32, example = 1)]
    pub id: PublicationId,
    /// Body text.
    #[schema(example = "First post")]
    pub content: String,
    /// Identifier of the authoring user.
    #[schema(value_type = i32, example = 1)]
    pub creator_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Publication> for PublicationPayload {
    fn from(value: Publication) -> Self {
        Self {
            id: value.id,
            content: value.content.into(),
            creator_id: value.creator_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Request to create a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublicationRequest {
    /// Body text; must be non-empty once trimmed.
    pub content: String,
    /// The authenticated user creating the publication.
    pub creator_id: UserId,
}

/// Driving port for publication write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationsCommand: Send + Sync {
    /// Persist a new publication owned by the requesting user.
    ///
    /// Returns the stored publication, including its assigned identifier and
    /// timestamps. Fails with an invalid-request error when the content is
    /// blank.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tribune_backend::domain::UserId;
    /// # use tribune_backend::domain::ports::{
    /// #     CreatePublicationRequest, FixturePublicationsCommand, PublicationsCommand,
    /// # };
    /// # async fn example() -> Result<(), tribune_backend::domain::Error> {
    /// let command = FixturePublicationsCommand;
    /// let request = CreatePublicationRequest {
    ///     content: "First post".to_owned(),
    ///     creator_id: UserId::new(7).expect("positive id"),
    /// };
    /// let publication = command.create(request).await?;
    /// assert_eq!(publication.content, "First post");
    /// assert_eq!(publication.creator_id.get(), 7);
    /// # Ok(())
    /// # }
    /// ```
    async fn create(&self, request: CreatePublicationRequest)
    -> Result<PublicationPayload, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePublicationsCommand;

#[async_trait]
impl PublicationsCommand for FixturePublicationsCommand {
    async fn create(
        &self,
        request: CreatePublicationRequest,
    ) -> Result<PublicationPayload, Error> {
        if request.content.trim().is_empty() {
            return Err(Error::invalid_request(
                "publication content must not be empty",
            ));
        }
        let id = PublicationId::new(1)
            .map_err(|err| Error::internal(format!("invalid fixture publication id: {err}")))?;
        let now = Utc::now();
        Ok(PublicationPayload {
            id,
            content: request.content,
            creator_id: request.creator_id,
            created_at: now,
            updated_at: now,
        })
    }
}
