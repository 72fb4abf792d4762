//! Uniform response envelope for the REST surface.
//!
//! Every endpoint, success or failure, answers with the same wrapper:
//! `{status, msg, details}`. `status` is `true` exactly when the request
//! succeeded, `msg` carries a human-readable sentence, and `details` holds
//! the operation payload (or structured error context, or `null`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Generic response wrapper serialized identically by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiEnvelope<T> {
    /// `true` when the request succeeded.
    #[schema(example = true)]
    pub status: bool,
    /// Human-readable outcome sentence.
    #[schema(example = "Voted successfully.")]
    pub msg: String,
    /// Operation payload; `null` on errors without structured context.
    pub details: T,
}

impl<T> ApiEnvelope<T> {
    /// Wrap a successful payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tribune_backend::inbound::http::envelope::ApiEnvelope;
    ///
    /// let envelope = ApiEnvelope::success("Publications successfully received.", vec![1, 2]);
    /// assert!(envelope.status);
    /// assert_eq!(envelope.details, vec![1, 2]);
    /// ```
    pub fn success(msg: impl Into<String>, details: T) -> Self {
        Self {
            status: true,
            msg: msg.into(),
            details,
        }
    }
}

impl ApiEnvelope<Option<Value>> {
    /// Wrap a failure message with optional structured context.
    pub fn failure(msg: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            status: false,
            msg: msg.into(),
            details,
        }
    }
}
