//! Authentication handlers.

use actix_web::{HttpResponse, web};

use replysmith_core::domain::{Role, User, mask_email};
use replysmith_shared::dto::{
    AuthResponse, LoginRequest, MessageResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, RegisterRequest,
};

use crate::middleware::auth::{Identity, load_caller};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

const RESET_ACCEPTED: &str = "If an account exists for that email, a reset link has been sent.";

pub(crate) fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn issue_token(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token =
        state
            .tokens
            .generate_token(user.id, &user.email, vec![user.role.to_string()])?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(state.tokens.expiration_seconds()).unwrap_or_default(),
        user: user.profile(),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = normalize_email(&req.email);

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    validate_password(&req.password)?;

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = state.passwords.hash(&req.password)?;

    let user = if state.accounts.is_bootstrap_admin(&email) {
        User::new(email, password_hash, Role::Admin)
    } else {
        User::new(email, password_hash, Role::Interested).with_trial(state.accounts.trial_days)
    };
    let user = state.users.save(user).await?;

    tracing::info!(
        user_id = %user.id,
        user_email = %mask_email(&user.email),
        role = %user.role,
        "Account registered"
    );

    Ok(HttpResponse::Created().json(issue_token(&state, &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = normalize_email(&req.email);

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::info!(user_email = %mask_email(&email), "Failed login");
        return Err(invalid());
    }

    Ok(HttpResponse::Ok().json(issue_token(&state, &user)?))
}

/// POST /api/auth/password-reset
///
/// Always 202 so the endpoint does not reveal which emails exist. Delivery
/// of the reset token happens outside this service; it is logged here.
pub async fn request_password_reset(
    state: web::Data<AppState>,
    body: web::Json<PasswordResetRequest>,
) -> AppResult<HttpResponse> {
    let email = normalize_email(&body.email);

    match state.users.find_by_email(&email).await {
        Ok(Some(user)) => match state.tokens.generate_reset_token(user.id, &user.email) {
            Ok(reset_token) => tracing::info!(
                user_id = %user.id,
                user_email = %mask_email(&user.email),
                reset_token = %reset_token,
                "Password reset requested"
            ),
            Err(e) => tracing::error!(error = %e, "Failed to issue reset token"),
        },
        Ok(None) => tracing::debug!(user_email = %mask_email(&email), "Password reset for unknown email"),
        Err(e) => tracing::error!(error = %e, "Password reset lookup failed"),
    }

    Ok(HttpResponse::Accepted().json(MessageResponse::new(RESET_ACCEPTED)))
}

/// POST /api/auth/password-reset/confirm
pub async fn confirm_password_reset(
    state: web::Data<AppState>,
    body: web::Json<PasswordResetConfirmRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let invalid = || AppError::BadRequest("Invalid or expired reset token".to_string());

    let claims = state
        .tokens
        .validate_reset_token(&req.token)
        .map_err(|_| invalid())?;
    validate_password(&req.new_password)?;

    let mut user = state
        .users
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(invalid)?;

    user.set_password_hash(state.passwords.hash(&req.new_password)?);
    state.users.save(user).await?;

    tracing::info!(user_id = %claims.user_id, "Password reset completed");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password updated")))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = load_caller(&state, &identity).await?;

    Ok(HttpResponse::Ok().json(user.profile()))
}
