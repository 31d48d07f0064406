//! Authentication extractor and role-gate helpers.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use replysmith_core::access::{self, GateDecision, UPGRADE_MESSAGE};
use replysmith_core::domain::User;
use replysmith_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated caller, decoded from a Bearer access token.
///
/// Only proves who the caller is. Authorization always goes through
/// [`load_caller`] and friends, which read the stored role.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub email: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal("Server configuration error".to_string())));
        };

        let result = bearer_token(req)
            .and_then(|token| state.tokens.validate_token(token))
            .map(Identity::from)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected credentials");
                AppError::from(e)
            });

        ready(result)
    }
}

/// Load the caller's stored account. A valid token for a deleted account is
/// treated as unauthenticated.
pub async fn load_caller(state: &AppState, identity: &Identity) -> AppResult<User> {
    state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))
}

/// Caller's account, provided its stored role may run generations.
pub async fn require_generation(state: &AppState, identity: &Identity) -> AppResult<User> {
    let user = load_caller(state, identity).await?;

    match access::gate_generation(user.role) {
        GateDecision::Allowed => Ok(user),
        GateDecision::UpgradeRequired => {
            tracing::info!(user_id = %user.id, role = %user.role, "Generation blocked by role gate");
            Err(AppError::UpgradeRequired(UPGRADE_MESSAGE.to_string()))
        }
    }
}

/// Caller's account, provided it is an admin.
pub async fn require_admin(state: &AppState, identity: &Identity) -> AppResult<User> {
    let user = load_caller(state, identity).await?;

    if access::can_manage_users(user.role) {
        Ok(user)
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}
