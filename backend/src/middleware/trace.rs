//! Request correlation middleware.
//!
//! [`Trace`] tags every request with a fresh UUID, keeps it in tokio
//! task-local storage while the handler runs, and stamps it onto the
//! response as a `trace-id` header. Anything executing within the request,
//! from extractors to domain errors, can pick the identifier up through
//! [`TraceId::current`].
//!
//! Task-local values do not cross `tokio::spawn` boundaries. Wrap spawned
//! or blocking work in [`TraceId::scope`] to keep the identifier visible
//! there.

use std::future::Future;
use std::str::FromStr;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::warn;
use uuid::Uuid;

/// Name of the response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE_TRACE: TraceId;
}

/// Identifier correlating one request's logs, errors, and response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    /// The trace identifier of the request currently being served.
    ///
    /// `None` outside a request, and inside tasks spawned without
    /// [`TraceId::scope`].
    ///
    /// # Examples
    /// ```
    /// use tribune_backend::middleware::trace::TraceId;
    ///
    /// async fn handler() {
    ///     if let Some(id) = TraceId::current() {
    ///         println!("serving request {id}");
    ///     }
    /// }
    /// ```
    pub fn current() -> Option<Self> {
        ACTIVE_TRACE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` installed as the active identifier.
    ///
    /// # Examples
    /// ```
    /// use tribune_backend::middleware::trace::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let seen = TraceId::scope(id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        ACTIVE_TRACE.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Middleware issuing a [`TraceId`] per request.
///
/// Wrap the whole `App` in it so the identifier is in scope for every
/// handler:
///
/// ```
/// use actix_web::App;
/// use tribune_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceService { inner: service }))
    }
}

/// The wrapped service behind [`Trace`]; not used directly.
pub struct TraceService<S> {
    inner: S,
}

fn stamp_response<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    // A hyphenated UUID is always a valid header value.
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => warn!(%error, %trace_id, "trace identifier is not a valid header value"),
    }
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::mint();
        let fut = self.inner.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            stamp_response(&mut res, trace_id);
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    use super::*;
    use crate::domain::{ApiResult, Error};

    #[rstest]
    fn minted_ids_parse_back_as_uuids() {
        let id = TraceId::mint();
        let reparsed: TraceId = id.to_string().parse().expect("display output round-trips");
        assert_eq!(reparsed, id);
    }

    #[rstest]
    fn minted_ids_are_distinct() {
        assert_ne!(TraceId::mint(), TraceId::mint());
    }

    #[tokio::test]
    async fn current_sees_the_scoped_id_and_nothing_outside() {
        assert!(TraceId::current().is_none());

        let expected = TraceId::mint();
        let seen = TraceId::scope(expected, async { TraceId::current() }).await;
        assert_eq!(seen, Some(expected));

        assert!(TraceId::current().is_none());
    }

    #[actix_web::test]
    async fn responses_carry_a_parseable_trace_id_header() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::NoContent().finish() })),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header");
        header.parse::<TraceId>().expect("header holds a UUID");
    }

    #[actix_web::test]
    async fn handlers_observe_the_id_stamped_on_the_response() {
        let app = actix_test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let id = TraceId::current().expect("trace id in scope");
                HttpResponse::Ok().body(id.to_string())
            }),
        ))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;
        let stamped = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header")
            .to_owned();

        let body = actix_test::read_body(res).await;
        assert_eq!(stamped.as_bytes(), &body[..]);
    }

    #[actix_web::test]
    async fn error_responses_keep_the_header() {
        let app = actix_test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async { ApiResult::<HttpResponse>::Err(Error::forbidden("nope")) }),
        ))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }
}
