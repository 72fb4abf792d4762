//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the domain's driven ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: implementations only translate between Diesel rows
//!   and validated domain types. No business rules live here beyond the
//!   constraints the schema itself enforces (the unique vote pair).
//! - **Internal models**: row structs (`models`) and table definitions
//!   (`schema`) never cross the port boundary.
//! - **Stable errors**: database failures map onto the port error enums;
//!   driver detail goes to debug logs, not API responses.
//!
//! # Example
//!
//! ```ignore
//! use tribune_backend::outbound::persistence::{DbPool, DieselPublicationStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! let store = DieselPublicationStore::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_login_service;
mod diesel_publication_store;
mod diesel_vote_ledger;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_login_service::DieselLoginService;
pub use diesel_publication_store::DieselPublicationStore;
pub use diesel_vote_ledger::DieselVoteLedger;
pub use migrations::{MIGRATIONS, MigrationError, apply_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
