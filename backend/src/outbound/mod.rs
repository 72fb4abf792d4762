//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations; they contain no business rules.
//! PostgreSQL persistence is the only infrastructure this service talks to.

pub mod persistence;
