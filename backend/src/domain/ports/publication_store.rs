//! Port for publication persistence and rated listing reads.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{ListingOptions, NewPublication, Publication, PublicationId, RatedPublication};

use super::port_error;

port_error! {
    /// Errors raised by publication store adapters.
    pub enum PublicationStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "publication store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "publication store query failed: {message}",
    }
}

/// Port for writing publications and reading rated listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationStore: Send + Sync {
    /// Persist a new publication, returning the stored row.
    async fn create(&self, draft: NewPublication) -> Result<Publication, PublicationStoreError>;

    /// Read publications joined with their creator and vote aggregates.
    async fn list_with_ratings(
        &self,
        options: ListingOptions,
    ) -> Result<Vec<RatedPublication>, PublicationStoreError>;
}

/// Identifier the fixture assigns to created publications.
const FIXTURE_PUBLICATION_ID: i32 = 1;

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePublicationStore;

#[async_trait]
impl PublicationStore for FixturePublicationStore {
    async fn create(&self, draft: NewPublication) -> Result<Publication, PublicationStoreError> {
        let id = PublicationId::new(FIXTURE_PUBLICATION_ID)
            .map_err(|err| PublicationStoreError::query(err.to_string()))?;
        let now = Utc::now();
        Ok(Publication {
            id,
            content: draft.content,
            creator_id: draft.creator_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn list_with_ratings(
        &self,
        _options: ListingOptions,
    ) -> Result<Vec<RatedPublication>, PublicationStoreError> {
        Ok(Vec::new())
    }
}
