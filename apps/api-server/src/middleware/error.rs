//! Application error type and its JSON error body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use replysmith_core::error::{DomainError, RepoError};
use replysmith_core::ports::{AuthError, CompletionError};
use replysmith_shared::ErrorResponse;

use crate::observability::current_request_id;

/// Every handler failure ends up here and is rendered as
/// `{ error, title, status, code?, requestId? }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Upgrade required: {0}")]
    UpgradeRequired(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    /// The model provider failed or answered with an error.
    #[error("Bad gateway: {0}")]
    BadGateway(String),
    /// Server-side misconfiguration whose message is safe to show.
    #[error("Misconfigured: {0}")]
    Misconfigured(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::UpgradeRequired(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Misconfigured(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(msg) => ErrorResponse::not_found(msg),
            AppError::BadRequest(msg) => ErrorResponse::bad_request(msg),
            AppError::Unauthorized(msg) => ErrorResponse::unauthorized(msg),
            AppError::Forbidden(msg) => ErrorResponse::forbidden(msg),
            AppError::UpgradeRequired(msg) => ErrorResponse::upgrade_required(msg),
            AppError::Conflict(msg) => ErrorResponse::conflict(msg),
            AppError::BadGateway(msg) => ErrorResponse::bad_gateway(msg),
            AppError::Misconfigured(msg) => {
                tracing::error!(error = %msg, "Server misconfigured");
                ErrorResponse::internal_error(msg)
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                ErrorResponse::internal_error("Internal server error")
            }
        };

        let error = match current_request_id() {
            Some(id) => error.with_request_id(id),
            None => error,
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{entity_type} with id {id} not found"))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Unauthorized => AppError::Unauthorized("Unauthorized access".to_string()),
            DomainError::UpgradeRequired(msg) => AppError::UpgradeRequired(msg),
            DomainError::Completion(err) => err.into(),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<CompletionError> for AppError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::NotConfigured => AppError::Misconfigured(err.to_string()),
            other => {
                tracing::warn!(error = %other, "Chat completion failed");
                AppError::BadGateway(other.to_string())
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!(error = %msg, "Database connection error");
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!(error = %msg, "Database query error");
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::TokenExpired => AppError::Unauthorized(
                "Your session has expired. Please sign in again.".to_string(),
            ),
            AuthError::InvalidToken(_) => AppError::Unauthorized("Invalid token".to_string()),
            AuthError::MissingAuth => AppError::Unauthorized(
                "Please provide a valid Bearer token in the Authorization header.".to_string(),
            ),
            AuthError::InsufficientPermissions => {
                AppError::Forbidden("Insufficient permissions".to_string())
            }
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> serde_json::Value {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_upstream_failure_is_bad_gateway_with_message() {
        let err: AppError = DomainError::from(CompletionError::Upstream("quota".into())).into();

        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_of(err).await["error"], "OpenAI API error: quota");
    }

    #[actix_web::test]
    async fn test_missing_key_is_500_with_message() {
        let err: AppError = CompletionError::NotConfigured.into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(err).await["error"], "OpenAI API key not configured");
    }

    #[actix_web::test]
    async fn test_internal_detail_is_hidden() {
        let body = body_of(AppError::Internal("connection reset by peer".into())).await;

        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["status"], 500);
    }

    #[actix_web::test]
    async fn test_upgrade_required_carries_code() {
        let body = body_of(AppError::UpgradeRequired("Contact us".into())).await;

        assert_eq!(body["status"], 403);
        assert_eq!(body["code"], "upgrade_required");
    }
}
