//! Middleware attaching a request-scoped correlation identifier.
//!
//! Each incoming request is handled inside a tracing span carrying a UUID
//! `request_id`, and the same identifier is echoed back on the response in
//! a `request-id` header so clients can quote it when reporting problems.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::Instrument;
use uuid::Uuid;

/// Response header carrying the correlation identifier.
pub const REQUEST_ID_HEADER: &str = "request-id";

/// Middleware factory attaching a correlation id to every request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::Correlate;
///
/// let app = App::new().wrap(Correlate);
/// ```
#[derive(Clone)]
pub struct Correlate;

impl<S, B> Transform<S, ServiceRequest> for Correlate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelateMiddleware { service }))
    }
}

/// Service wrapper produced by [`Correlate`].
pub struct CorrelateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = self.service.call(req).instrument(span);

        Box::pin(async move {
            let mut res = fut.await?;
            if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn responses_carry_a_request_id_header() {
        let app = actix_test::init_service(
            App::new().wrap(Correlate).route("/", web::get().to(ok)),
        )
        .await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .expect("request-id header present");
        assert!(Uuid::parse_str(header).is_ok(), "header is a UUID");
    }

    #[actix_web::test]
    async fn each_request_receives_a_distinct_id() {
        let app = actix_test::init_service(
            App::new().wrap(Correlate).route("/", web::get().to(ok)),
        )
        .await;

        let mut seen = Vec::new();
        for _ in 0..2 {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri("/").to_request(),
            )
            .await;
            let header = response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .expect("request-id header present")
                .to_owned();
            seen.push(header);
        }
        assert_ne!(seen[0], seen[1]);
    }
}
