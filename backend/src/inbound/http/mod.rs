//! Inbound HTTP adapter: handlers, payloads, and the response envelope.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod publications;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod votes;
