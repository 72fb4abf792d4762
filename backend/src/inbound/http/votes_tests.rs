//! Tests for vote HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    ALREADY_VOTED_MESSAGE, MockVotesCommand, PUBLICATION_MISSING_MESSAGE, VOTE_MISSING_MESSAGE,
    VotesCommand,
};
use crate::domain::{UserId, VoteId};
use crate::inbound::http::auth;
use crate::inbound::http::error::{json_config, path_config};
use crate::inbound::http::test_utils::{login_and_get_cookie, test_session_middleware};

fn test_app_with_state(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .wrap(test_session_middleware())
        .service(web::scope("/auth").service(auth::login))
        .service(
            web::scope("/publications")
                .service(cast_vote)
                .service(change_vote)
                .service(retract_vote),
        )
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app_with_state(HttpState::fixture())
}

fn votes_state(votes: Arc<dyn VotesCommand>) -> HttpState {
    HttpState {
        votes,
        ..HttpState::fixture()
    }
}

fn canned_vote(publication_id: PublicationId, user_id: UserId, grade: bool) -> VotePayload {
    VotePayload {
        id: VoteId::new(42).expect("positive id"),
        publication_id,
        user_id,
        grade,
    }
}

#[actix_web::test]
async fn cast_without_session_is_forbidden() {
    let app = actix_test::init_service(test_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/publications/3/vote")
            .set_json(json!({"grade": true}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn cast_returns_created_vote_envelope() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/publications/3/vote")
            .cookie(cookie)
            .set_json(json!({"grade": true}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["msg"], VOTE_CAST_MESSAGE);
    assert_eq!(body["details"]["publicationId"], 3);
    assert_eq!(body["details"]["userId"], 1);
    assert_eq!(body["details"]["grade"], true);
}

#[actix_web::test]
async fn cast_on_missing_publication_reports_fixed_message() {
    let mut votes = MockVotesCommand::new();
    votes
        .expect_cast()
        .times(1)
        .returning(|_, _, _| Err(Error::invalid_request(PUBLICATION_MISSING_MESSAGE)));
    let app = actix_test::init_service(test_app_with_state(votes_state(Arc::new(votes)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/publications/9/vote")
            .cookie(cookie)
            .set_json(json!({"grade": true}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["msg"], PUBLICATION_MISSING_MESSAGE);
}

#[actix_web::test]
async fn second_cast_reports_already_voted() {
    let mut votes = MockVotesCommand::new();
    votes
        .expect_cast()
        .times(1)
        .returning(|_, _, _| Err(Error::invalid_request(ALREADY_VOTED_MESSAGE)));
    let app = actix_test::init_service(test_app_with_state(votes_state(Arc::new(votes)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/publications/3/vote")
            .cookie(cookie)
            .set_json(json!({"grade": false}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["msg"], ALREADY_VOTED_MESSAGE);
}

#[actix_web::test]
async fn change_passes_parsed_arguments_to_port() {
    let mut votes = MockVotesCommand::new();
    votes
        .expect_change()
        .withf(|publication_id, user_id, grade| {
            publication_id.get() == 3 && user_id.get() == 1 && !grade
        })
        .times(1)
        .returning(|publication_id, user_id, grade| {
            Ok(canned_vote(publication_id, user_id, grade))
        });
    let app = actix_test::init_service(test_app_with_state(votes_state(Arc::new(votes)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/publications/3/vote")
            .cookie(cookie)
            .set_json(json!({"grade": false}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["msg"], VOTE_CHANGED_MESSAGE);
    assert_eq!(body["details"]["id"], 42);
    assert_eq!(body["details"]["grade"], false);
}

#[actix_web::test]
async fn change_without_existing_vote_reports_fixed_message() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/publications/3/vote")
            .cookie(cookie)
            .set_json(json!({"grade": true}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["msg"], VOTE_MISSING_MESSAGE);
    assert_eq!(body["details"], Value::Null);
}

#[actix_web::test]
async fn retract_returns_removed_vote_envelope() {
    let mut votes = MockVotesCommand::new();
    votes
        .expect_retract()
        .withf(|publication_id, user_id| publication_id.get() == 3 && user_id.get() == 1)
        .times(1)
        .returning(|publication_id, user_id| Ok(canned_vote(publication_id, user_id, true)));
    let app = actix_test::init_service(test_app_with_state(votes_state(Arc::new(votes)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/publications/3/vote")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["msg"], VOTE_RETRACTED_MESSAGE);
    assert_eq!(body["details"]["publicationId"], 3);
}

#[actix_web::test]
async fn retract_without_existing_vote_reports_fixed_message() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/publications/3/vote")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["msg"], VOTE_MISSING_MESSAGE);
}

#[actix_web::test]
async fn non_positive_publication_id_is_rejected() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/publications/0/vote")
            .cookie(cookie)
            .set_json(json!({"grade": true}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(
        body["msg"]
            .as_str()
            .is_some_and(|msg| msg.starts_with("invalid publication id")),
        "unexpected msg: {body}"
    );
}

#[actix_web::test]
async fn non_numeric_publication_id_is_rejected_via_path_config() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/publications/first/vote")
            .cookie(cookie)
            .set_json(json!({"grade": true}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(
        body["msg"]
            .as_str()
            .is_some_and(|msg| msg.starts_with("invalid path parameter")),
        "unexpected msg: {body}"
    );
}
