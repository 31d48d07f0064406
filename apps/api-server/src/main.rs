//! # Replysmith API Server
//!
//! Actix-web server exposing the generation endpoints, accounts and the
//! admin console.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use replysmith_core::ports::RateLimiter;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

#[cfg(test)]
mod test_support;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        host = %config.host,
        port = config.port,
        model = %config.openai.model,
        "Starting Replysmith API server"
    );

    let state = AppState::new(&config).await?;
    let limiter = build_rate_limiter();

    HttpServer::new(move || {
        let limiter = limiter.clone();
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, limiter))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(feature = "rate-limit")]
fn build_rate_limiter() -> Option<Arc<dyn RateLimiter>> {
    let limiter = replysmith_infra::InMemoryRateLimiter::from_env();
    tracing::info!("Rate limiting enabled on generation endpoints");
    Some(Arc::new(limiter))
}

#[cfg(not(feature = "rate-limit"))]
fn build_rate_limiter() -> Option<Arc<dyn RateLimiter>> {
    tracing::info!("Rate limiting disabled");
    None
}
