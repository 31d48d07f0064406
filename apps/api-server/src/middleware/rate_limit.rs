//! Rate limiting middleware for the generation scope.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    http::header::{HeaderName, HeaderValue},
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use replysmith_core::ports::RateLimiter;
use replysmith_shared::ErrorResponse;

use crate::observability::current_request_id;

/// Rate limiting middleware factory, keyed by client address.
///
/// Without a limiter every request passes. Preflight requests are never
/// counted. Limiter errors fail open.
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Option<Arc<dyn RateLimiter>>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let limiter = match &self.limiter {
            Some(limiter) if req.method() != Method::OPTIONS => Arc::clone(limiter),
            _ => {
                return Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                });
            }
        };

        let key = client_key(&req);

        Box::pin(async move {
            match limiter.check(&key).await {
                Ok(result) if !result.allowed => {
                    let retry_after = result.reset_after.as_secs().max(1);
                    tracing::warn!(client = %key, retry_after, "Rate limit exceeded");

                    let mut error = ErrorResponse::too_many_requests();
                    if let Some(id) = current_request_id() {
                        error = error.with_request_id(id);
                    }

                    let response = HttpResponse::TooManyRequests()
                        .insert_header(("X-RateLimit-Remaining", "0"))
                        .insert_header(("Retry-After", retry_after.to_string()))
                        .json(error);

                    let (http_req, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
                Ok(result) => {
                    let mut res = service.call(req).await?;
                    res.headers_mut().insert(
                        HeaderName::from_static("x-ratelimit-remaining"),
                        HeaderValue::from(result.remaining),
                    );
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    tracing::error!(error = %e, "Rate limiter error, failing open");
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

/// Limiter key for a request: the socket peer's IP. Forwarding headers are
/// client-controlled and never consulted.
fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use replysmith_core::ports::{RateLimitError, RateLimitResult};
    use std::sync::Mutex;
    use std::time::Duration;

    struct Fixed(Result<bool, ()>);

    #[async_trait]
    impl RateLimiter for Fixed {
        async fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
            match self.0 {
                Ok(allowed) => Ok(RateLimitResult {
                    allowed,
                    remaining: 0,
                    reset_after: Duration::from_secs(12),
                }),
                Err(()) => Err(RateLimitError::Backend("down".into())),
            }
        }
    }

    async fn call_with(
        limiter: Option<Arc<dyn RateLimiter>>,
        method: Method,
    ) -> ServiceResponse<impl actix_web::body::MessageBody> {
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(limiter))
                .route("/", web::route().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default().method(method).uri("/").to_request();
        test::call_service(&app, req).await
    }

    #[actix_web::test]
    async fn test_rejects_with_retry_after() {
        let res = call_with(Some(Arc::new(Fixed(Ok(false)))), Method::POST).await;

        assert_eq!(res.status(), 429);
        assert_eq!(res.headers().get("retry-after").unwrap(), "12");
    }

    #[actix_web::test]
    async fn test_preflight_is_not_limited() {
        let res = call_with(Some(Arc::new(Fixed(Ok(false)))), Method::OPTIONS).await;

        assert_eq!(res.status(), 200);
    }

    #[actix_web::test]
    async fn test_limiter_error_fails_open() {
        let res = call_with(Some(Arc::new(Fixed(Err(())))), Method::POST).await;

        assert_eq!(res.status(), 200);
    }

    #[actix_web::test]
    async fn test_no_limiter_passes() {
        let res = call_with(None, Method::POST).await;

        assert_eq!(res.status(), 200);
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    #[async_trait]
    impl RateLimiter for Recording {
        async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
            self.0.lock().unwrap().push(key.to_string());
            Ok(RateLimitResult {
                allowed: true,
                remaining: 5,
                reset_after: Duration::from_secs(60),
            })
        }
    }

    #[actix_web::test]
    async fn test_key_ignores_forwarding_headers() {
        let limiter = Arc::new(Recording::default());
        let shared: Arc<dyn RateLimiter> = limiter.clone();
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(Some(shared)))
                .route("/", web::route().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        for forwarded in ["1.1.1.1", "2.2.2.2"] {
            let req = test::TestRequest::post()
                .uri("/")
                .peer_addr("10.0.0.7:4000".parse().unwrap())
                .insert_header(("X-Forwarded-For", forwarded))
                .insert_header(("Forwarded", format!("for={forwarded}")))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.headers().get("x-ratelimit-remaining").unwrap(), "5");
        }

        assert_eq!(*limiter.0.lock().unwrap(), vec!["10.0.0.7", "10.0.0.7"]);
    }
}
