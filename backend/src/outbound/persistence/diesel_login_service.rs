//! Diesel-backed `LoginService` adapter.
//!
//! This adapter keeps the fixture credential contract (`admin`/`password`)
//! until credential persistence lands, while upserting the authenticated
//! user's row in PostgreSQL so publication creator joins resolve.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, User};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const FIXTURE_USERNAME: &str = "admin";
const FIXTURE_PASSWORD: &str = "password";

/// Diesel-backed `LoginService` that preserves fixture-authentication
/// semantics.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Upsert the user row by username and return the stored row.
    ///
    /// The conflict arm re-sets the username rather than doing nothing so
    /// `RETURNING` yields the existing row; `DO NOTHING` returns no row on
    /// conflict.
    async fn upsert_user(&self, username: &str) -> Result<UserRow, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(&NewUserRow { username })
            .on_conflict(users::username)
            .do_update()
            .set(users::username.eq(username))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

fn map_pool_error(error: PoolError) -> Error {
    Error::internal(format!("user store unavailable: {error}"))
}

fn map_diesel_error(error: diesel::result::Error) -> Error {
    Error::internal(format!("user upsert failed: {error}"))
}

fn fixture_credentials_match(credentials: &LoginCredentials) -> bool {
    credentials.username().as_ref() == FIXTURE_USERNAME
        && credentials.password() == FIXTURE_PASSWORD
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if !fixture_credentials_match(credentials) {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let row = self.upsert_user(FIXTURE_USERNAME).await?;
        User::try_from_parts(row.id, row.username)
            .map_err(|err| Error::internal(format!("stored user is invalid: {err}")))
    }
}
