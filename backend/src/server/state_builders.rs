//! Builders selecting PostgreSQL-backed or fixture ports for the HTTP state.

use std::sync::Arc;

use actix_web::web;

use tribune_backend::domain::ports::{
    FixtureLoginService, FixturePublicationsCommand, FixturePublicationsQuery, FixtureVotesCommand,
    LoginService, PublicationStore, PublicationsCommand, PublicationsQuery, VoteLedger,
    VotesCommand,
};
use tribune_backend::domain::{
    PublicationCommandService, PublicationQueryService, VoteCommandService,
};
use tribune_backend::inbound::http::state::HttpState;
use tribune_backend::outbound::persistence::{
    DieselLoginService, DieselPublicationStore, DieselVoteLedger,
};

use super::ServerConfig;

/// Select the login port: database-backed when a pool is available, fixture
/// otherwise.
fn build_login_service_with_pool<Pool, S>(
    pool: &Option<Pool>,
    make_service: impl FnOnce(&Pool) -> S,
) -> Arc<dyn LoginService>
where
    S: LoginService + 'static,
{
    match pool {
        Some(pool) => Arc::new(make_service(pool)),
        None => Arc::new(FixtureLoginService),
    }
}

/// Select the publication command/query pair. Both services share one store
/// so creation and listing observe the same rows.
fn build_publication_services_with_pool<Pool, S>(
    pool: &Option<Pool>,
    make_store: impl FnOnce(&Pool) -> S,
) -> (Arc<dyn PublicationsCommand>, Arc<dyn PublicationsQuery>)
where
    S: PublicationStore + 'static,
{
    match pool {
        Some(pool) => {
            let store = Arc::new(make_store(pool));
            (
                Arc::new(PublicationCommandService::new(store.clone())),
                Arc::new(PublicationQueryService::new(store)),
            )
        }
        None => (
            Arc::new(FixturePublicationsCommand),
            Arc::new(FixturePublicationsQuery),
        ),
    }
}

/// Select the vote command port over the ledger adapter.
fn build_votes_service_with_pool<Pool, L>(
    pool: &Option<Pool>,
    make_ledger: impl FnOnce(&Pool) -> L,
) -> Arc<dyn VotesCommand>
where
    L: VoteLedger + 'static,
{
    match pool {
        Some(pool) => Arc::new(VoteCommandService::new(Arc::new(make_ledger(pool)))),
        None => Arc::new(FixtureVotesCommand),
    }
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let login = build_login_service_with_pool(&config.db_pool, |pool| {
        DieselLoginService::new(pool.clone())
    });
    let (publications, listings) = build_publication_services_with_pool(&config.db_pool, |pool| {
        DieselPublicationStore::new(pool.clone())
    });
    let votes = build_votes_service_with_pool(&config.db_pool, |pool| {
        DieselVoteLedger::new(pool.clone())
    });

    web::Data::new(HttpState {
        login,
        publications,
        listings,
        votes,
    })
}
