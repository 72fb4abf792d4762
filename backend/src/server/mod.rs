//! Assembles the Actix application and spawns the listener.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use tribune_backend::Trace;
#[cfg(debug_assertions)]
use tribune_backend::doc::ApiDoc;
use tribune_backend::inbound::http::auth::login;
use tribune_backend::inbound::http::error::{json_config, path_config, query_config};
use tribune_backend::inbound::http::health::{HealthState, liveness, readiness};
use tribune_backend::inbound::http::publications::{create_publication, list_publications};
use tribune_backend::inbound::http::state::HttpState;
use tribune_backend::inbound::http::votes::{cast_vote, change_vote, retract_vote};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const SESSION_TTL: actix_web::cookie::time::Duration = actix_web::cookie::time::Duration::hours(2);

/// Cookie-session middleware shared by the `/auth` and `/publications` scopes.
fn session_layer(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(SESSION_TTL))
        .build()
}

/// Cheap-to-clone pieces each worker's `App` is assembled from.
#[derive(Clone)]
struct AppWiring {
    health: web::Data<HealthState>,
    http: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    wiring: AppWiring,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let auth = web::scope("/auth")
        .wrap(session_layer(
            wiring.key.clone(),
            wiring.cookie_secure,
            wiring.same_site,
        ))
        .service(login);
    let publications = web::scope("/publications")
        .wrap(session_layer(
            wiring.key,
            wiring.cookie_secure,
            wiring.same_site,
        ))
        .service(create_publication)
        .service(list_publications)
        .service(cast_vote)
        .service(change_vote)
        .service(retract_vote);

    let app = App::new()
        .app_data(wiring.health)
        .app_data(wiring.http)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(auth)
        .service(publications)
        .service(readiness)
        .service(liveness);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Spawn the HTTP listener with all scopes and middleware wired.
///
/// Readiness flips once construction succeeds, so `/readyz` answers 204 as
/// soon as the returned [`Server`] is being driven.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let app_health = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppWiring {
            health: app_health.clone(),
            http: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
