//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

/// Build a session middleware configured for tests.
///
/// Uses a fresh signing key per invocation, the production cookie name
/// (`session`), and no `Secure` flag so plain-HTTP test requests work.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Log in with the fixture credentials and return the session cookie.
///
/// The app under test must register `auth::login` under `/auth` and carry a
/// state whose login port accepts `admin` / `password`.
pub async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let login_req = actix_web::test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "username": "admin",
            "password": "password",
        }))
        .to_request();
    let login_res = actix_web::test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
