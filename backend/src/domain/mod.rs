//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities and the use-case services
//! operating on them. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Publication / Vote / User — the core entities and their identifiers.
//! - ListingOptions / RatedPublication — publication listing inputs and rows.
//! - Error / ErrorCode — domain error payload with stable identifiers.
//! - ports — hexagonal boundary traits plus their fixtures.
//! - *Service types — driving-port implementations wired by the server.

pub mod auth;
pub mod error;
pub mod listing;
pub mod ports;
pub mod publication;
pub mod publication_service;
pub mod user;
pub mod vote;
pub mod vote_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::listing::{DEFAULT_LISTING_LIMIT, ListingOptions, OrderBy, RatedPublication};
pub use self::publication::{
    Content, NewPublication, Publication, PublicationId, PublicationValidationError,
};
pub use self::publication_service::{PublicationCommandService, PublicationQueryService};
pub use self::user::{User, UserId, UserValidationError, Username};
pub use self::vote::{Vote, VoteId, VoteValidationError};
pub use self::vote_service::VoteCommandService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use tribune_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
