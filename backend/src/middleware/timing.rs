//! Request timing middleware.
//!
//! Wraps every request, awaits the inner service, and emits one structured
//! log line reporting the elapsed milliseconds. Diagnostic output only; the
//! response passes through unaltered.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::info;

/// Timing middleware logging one line per completed request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use roster_backend::RequestTiming;
///
/// let app = App::new().wrap(RequestTiming);
/// ```
#[derive(Clone)]
pub struct RequestTiming;

impl<S, B> Transform<S, ServiceRequest> for RequestTiming
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTimingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimingMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequestTiming`].
///
/// Applications should not use this type directly.
pub struct RequestTimingMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTimingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            info!(
                %method,
                path = %path,
                status = res.status().as_u16(),
                elapsed_ms,
                "request completed"
            );
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    //! The middleware must be transparent to the wrapped service.

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    use super::*;

    #[actix_web::test]
    async fn responses_pass_through_unaltered() {
        let app = actix_test::init_service(
            App::new().wrap(RequestTiming).route(
                "/ping",
                web::get().to(|| async { HttpResponse::Ok().body("pong") }),
            ),
        )
        .await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/ping").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        assert_eq!(body, "pong");
    }

    #[actix_web::test]
    async fn error_responses_pass_through_unaltered() {
        let app = actix_test::init_service(
            App::new().wrap(RequestTiming).route(
                "/boom",
                web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
            ),
        )
        .await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/boom").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
