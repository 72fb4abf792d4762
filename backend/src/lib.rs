//! Library side of the publication service: domain, adapters, middleware.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// OpenAPI document served by Swagger UI and dumped by tooling.
pub use doc::ApiDoc;
/// Request correlation middleware applied by the server wiring.
pub use middleware::Trace;
