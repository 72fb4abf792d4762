//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O. The
//! concrete implementations behind the ports are chosen at wiring time.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLoginService, FixturePublicationsCommand, FixturePublicationsQuery, FixtureVotesCommand,
    LoginService, PublicationsCommand, PublicationsQuery, VotesCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication use-case.
    pub login: Arc<dyn LoginService>,
    /// Publication write use-case.
    pub publications: Arc<dyn PublicationsCommand>,
    /// Publication listing use-case.
    pub listings: Arc<dyn PublicationsQuery>,
    /// Vote lifecycle use-case.
    pub votes: Arc<dyn VotesCommand>,
}

impl HttpState {
    /// State backed entirely by in-process fixture adapters.
    ///
    /// Used by handler tests and by the server when no database pool is
    /// configured, so the binary still boots for local smoke checks.
    ///
    /// # Examples
    /// ```
    /// use tribune_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixture();
    /// let _login = state.login.clone();
    /// ```
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            publications: Arc::new(FixturePublicationsCommand),
            listings: Arc::new(FixturePublicationsQuery),
            votes: Arc::new(FixtureVotesCommand),
        }
    }
}
