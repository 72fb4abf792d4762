//! Cross-cutting request middleware.
//!
//! Currently only request correlation lives here; session handling is
//! configured per scope by the server wiring instead.

pub mod trace;

pub use trace::Trace;
