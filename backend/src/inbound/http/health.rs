//! Liveness and readiness probes for orchestration and load balancers.

use actix_web::{HttpResponse, get, http::header, web};
use std::sync::atomic::{AtomicBool, Ordering};

/// Readiness flag shared between the server bootstrap and the probes.
///
/// The process reports live as soon as it serves traffic; readiness flips on
/// once wiring (pool, migrations, session key) has completed.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a probe state that starts as not ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark startup wiring as complete.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Return readiness state.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::NoContent()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Liveness probe. Answers 204 for as long as the process serves requests.
#[utoipa::path(
    get,
    path = "/healthz",
    tags = ["health"],
    security([]),
    responses(
        (status = 204, description = "Process is serving requests")
    )
)]
#[get("/healthz")]
pub async fn liveness() -> HttpResponse {
    HealthState::probe_response(true)
}

/// Readiness probe. Answers 204 once startup wiring completed, 503 before.
#[utoipa::path(
    get,
    path = "/readyz",
    tags = ["health"],
    security([]),
    responses(
        (status = 204, description = "Server is ready to handle traffic"),
        (status = 503, description = "Startup wiring has not completed")
    )
)]
#[get("/readyz")]
pub async fn readiness(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}
