//! Driving port for authentication.
//!
//! Inbound adapters authenticate through this trait and never see the
//! backing store, which keeps handler tests free of database wiring.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Authenticates credentials on behalf of inbound adapters.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Username the fixture authenticator accepts.
const FIXTURE_USERNAME: &str = "admin";
/// Password the fixture authenticator accepts.
const FIXTURE_PASSWORD: &str = "password";

/// In-memory authenticator used when no database pool is configured.
///
/// Exactly one account exists: `admin` with password `password`, mapped to
/// user id 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let accepted = credentials.username().as_ref() == FIXTURE_USERNAME
            && credentials.password() == FIXTURE_PASSWORD;
        if !accepted {
            return Err(Error::unauthorized("invalid credentials"));
        }

        User::try_from_parts(1, FIXTURE_USERNAME)
            .map_err(|err| Error::internal(format!("invalid fixture user: {err}")))
    }
}
