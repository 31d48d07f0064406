//! HTTP handlers and route configuration.

mod account;
mod admin;
mod auth;
mod format;
mod generation;
mod health;

use std::sync::Arc;

use actix_web::{HttpResponse, middleware::DefaultHeaders, web};

use replysmith_core::ports::RateLimiter;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "authorization, x-client-info, apikey, content-type",
    ),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
];

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: Option<Arc<dyn RateLimiter>>) {
    let cors = CORS_HEADERS
        .iter()
        .fold(DefaultHeaders::new(), |headers, &pair| headers.add(pair));

    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/functions/v1")
                .wrap(RateLimitMiddleware::new(limiter))
                .wrap(cors)
                .route("/analysis", web::post().to(generation::analysis))
                .route("/comment", web::post().to(generation::comment))
                .route(
                    "/conversational-comment",
                    web::post().to(generation::conversational_comment),
                )
                .route(
                    "/generate-suggestions",
                    web::post().to(generation::generate_suggestions),
                )
                .route(
                    "/analysis-suggestions",
                    web::post().to(generation::analysis_suggestions),
                )
                .route("/improve-analysis", web::post().to(generation::improve_analysis))
                .route("/{tail:.*}", web::method(actix_web::http::Method::OPTIONS).to(preflight)),
        )
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/format/analysis", web::post().to(format::format_analysis))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/password-reset", web::post().to(auth::request_password_reset))
                        .route(
                            "/password-reset/confirm",
                            web::post().to(auth::confirm_password_reset),
                        )
                        .route("/me", web::get().to(auth::me)),
                )
                .service(
                    web::scope("/account")
                        .route("", web::get().to(account::get_account))
                        .route("/password", web::put().to(account::change_password)),
                )
                .service(
                    web::scope("/admin")
                        .route("/users", web::get().to(admin::list_users))
                        .route("/users/{id}/role", web::put().to(admin::update_role)),
                ),
        );
}

/// CORS preflight for the generation scope.
async fn preflight() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// Malformed JSON bodies become a 400 in the standard error shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid JSON body: {err}")).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid path: {err}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    use crate::test_support::{TestApp, ScriptedCompletion};

    #[actix_web::test]
    async fn test_preflight_returns_cors_headers() {
        let ctx = TestApp::new(ScriptedCompletion::replying("unused"));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/functions/v1/analysis")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 200);
        assert_eq!(res.headers().get("access-control-allow-origin").unwrap(), "*");
        assert!(
            res.headers()
                .get("access-control-allow-headers")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("authorization")
        );
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let ctx = TestApp::new(ScriptedCompletion::replying("unused"));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;

        assert!(res.status().is_success());
    }
}
