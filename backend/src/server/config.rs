//! Carrier for everything the HTTP server needs at construction time.

use actix_web::cookie::{Key, SameSite};
use std::net::SocketAddr;
use tribune_backend::outbound::persistence::DbPool;

/// Session, socket, and persistence choices for one server instance.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Assemble a configuration from validated session settings and a bind
    /// address.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Hand the server a database pool to back its adapters with.
    ///
    /// With a pool the server answers through the PostgreSQL-backed
    /// adapters; without one the fixture adapters serve so the binary still
    /// boots for local smoke tests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
