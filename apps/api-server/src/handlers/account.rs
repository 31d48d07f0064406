//! Account page handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use replysmith_core::access;
use replysmith_shared::dto::{AccountResponse, ChangePasswordRequest, MessageResponse};

use crate::handlers::auth::validate_password;
use crate::middleware::auth::{Identity, load_caller};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/account
pub async fn get_account(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = load_caller(&state, &identity).await?;

    Ok(HttpResponse::Ok().json(AccountResponse {
        role_description: access::role_description(user.role).to_string(),
        trial: access::trial_status(user.role, user.trial_ends_at, Utc::now()),
        can_generate: access::can_generate(user.role),
        profile: user.profile(),
    }))
}

/// PUT /api/account/password
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_password(&req.new_password)?;
    if req.new_password != req.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".to_string()));
    }

    let mut user = load_caller(&state, &identity).await?;
    user.set_password_hash(state.passwords.hash(&req.new_password)?);
    state.users.save(user).await?;

    tracing::info!(user_id = %identity.user_id, "Password changed");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")))
}
