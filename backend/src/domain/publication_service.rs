//! Publication domain services.
//!
//! These services implement the publication driving ports for creating
//! publications and reading rated listings. Store failures surface as opaque
//! internal errors; validation failures surface as invalid requests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CreatePublicationRequest, PublicationPayload, PublicationStore, PublicationStoreError,
    PublicationsCommand, PublicationsQuery, RatedPublicationPayload,
};
use crate::domain::{Content, Error, ListingOptions, NewPublication};

fn map_store_error(error: PublicationStoreError) -> Error {
    match error {
        PublicationStoreError::Connection { message } => {
            Error::internal(format!("publication store unavailable: {message}"))
        }
        PublicationStoreError::Query { message } => {
            Error::internal(format!("publication store error: {message}"))
        }
    }
}

/// Publication service implementing the command driving port.
#[derive(Clone)]
pub struct PublicationCommandService<S> {
    publication_store: Arc<S>,
}

impl<S> PublicationCommandService<S> {
    /// Create a new command service with the publication store.
    pub fn new(publication_store: Arc<S>) -> Self {
        Self { publication_store }
    }
}

#[async_trait]
impl<S> PublicationsCommand for PublicationCommandService<S>
where
    S: PublicationStore,
{
    async fn create(
        &self,
        request: CreatePublicationRequest,
    ) -> Result<PublicationPayload, Error> {
        let content =
            Content::new(request.content).map_err(|err| Error::invalid_request(err.to_string()))?;
        let draft = NewPublication::new(content, request.creator_id);

        let publication = self
            .publication_store
            .create(draft)
            .await
            .map_err(map_store_error)?;

        Ok(PublicationPayload::from(publication))
    }
}

/// Publication service implementing the query driving port.
#[derive(Clone)]
pub struct PublicationQueryService<S> {
    publication_store: Arc<S>,
}

impl<S> PublicationQueryService<S> {
    /// Create a new query service with the publication store.
    pub fn new(publication_store: Arc<S>) -> Self {
        Self { publication_store }
    }
}

#[async_trait]
impl<S> PublicationsQuery for PublicationQueryService<S>
where
    S: PublicationStore,
{
    async fn list(&self, options: ListingOptions) -> Result<Vec<RatedPublicationPayload>, Error> {
        let rows = self
            .publication_store
            .list_with_ratings(options)
            .await
            .map_err(map_store_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "publication_service_tests.rs"]
mod tests;
