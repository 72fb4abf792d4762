//! Tests for publication services.

use std::sync::Arc;

use chrono::Utc;

use super::*;
use crate::domain::ports::MockPublicationStore;
use crate::domain::{ErrorCode, Publication, PublicationId, RatedPublication, User, UserId};

fn creator_id() -> UserId {
    UserId::new(7).expect("positive user id")
}

fn sample_create_request() -> CreatePublicationRequest {
    CreatePublicationRequest {
        content: "First post".to_owned(),
        creator_id: creator_id(),
    }
}

fn stored_publication(draft: NewPublication) -> Publication {
    let now = Utc::now();
    Publication {
        id: PublicationId::new(1).expect("positive id"),
        content: draft.content,
        creator_id: draft.creator_id,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn create_persists_draft_and_returns_stored_payload() {
    let mut store = MockPublicationStore::new();
    store
        .expect_create()
        .times(1)
        .return_once(|draft| Ok(stored_publication(draft)));

    let service = PublicationCommandService::new(Arc::new(store));
    let publication = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    assert_eq!(publication.id.get(), 1);
    assert_eq!(publication.content, "First post");
    assert_eq!(publication.creator_id, creator_id());
}

#[tokio::test]
async fn create_rejects_blank_content_without_touching_store() {
    let mut store = MockPublicationStore::new();
    store.expect_create().times(0);

    let service = PublicationCommandService::new(Arc::new(store));
    let error = service
        .create(CreatePublicationRequest {
            content: "   ".to_owned(),
            creator_id: creator_id(),
        })
        .await
        .expect_err("blank content must fail");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_maps_connection_error_to_internal() {
    let mut store = MockPublicationStore::new();
    store
        .expect_create()
        .times(1)
        .return_once(|_| Err(PublicationStoreError::connection("pool unavailable")));

    let service = PublicationCommandService::new(Arc::new(store));
    let error = service
        .create(sample_create_request())
        .await
        .expect_err("store failure propagates");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn list_forwards_options_and_converts_rows() {
    let expected_options = ListingOptions {
        order_by: crate::domain::OrderBy::CreatedAt,
        desc: true,
        limit: 3,
    };
    let row = RatedPublication {
        id: PublicationId::new(4).expect("positive id"),
        content: Content::new("hello").expect("non-empty content"),
        created_at: Utc::now(),
        rating: 2,
        vote_count: 6,
        creator: User::try_from_parts(7, "ada").expect("valid user"),
    };

    let mut store = MockPublicationStore::new();
    store
        .expect_list_with_ratings()
        .withf(move |options| *options == expected_options)
        .times(1)
        .return_once(move |_| Ok(vec![row]));

    let service = PublicationQueryService::new(Arc::new(store));
    let listed = service
        .list(expected_options)
        .await
        .expect("list succeeds");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].rating, 2);
    assert_eq!(listed[0].vote_count, 6);
    assert_eq!(listed[0].creator.username().as_ref(), "ada");
}

#[tokio::test]
async fn list_maps_query_error_to_internal() {
    let mut store = MockPublicationStore::new();
    store
        .expect_list_with_ratings()
        .times(1)
        .return_once(|_| Err(PublicationStoreError::query("broken sql")));

    let service = PublicationQueryService::new(Arc::new(store));
    let error = service
        .list(ListingOptions::default())
        .await
        .expect_err("query failure propagates");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
