//! User management for admins.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use replysmith_core::domain::{UserProfile, mask_email};
use replysmith_shared::dto::{RoleStats, UpdateRoleRequest, UserListResponse};

use crate::middleware::auth::{Identity, require_admin};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/users
///
/// All accounts, newest first, with per-role counts.
pub async fn list_users(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;

    let users = state.users.list().await?;
    let stats = RoleStats::tally(users.iter().map(|u| &u.role));
    let users: Vec<UserProfile> = users.iter().map(|u| u.profile()).collect();

    Ok(HttpResponse::Ok().json(UserListResponse { users, stats }))
}

/// PUT /api/admin/users/{id}/role
pub async fn update_role(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateRoleRequest>,
) -> AppResult<HttpResponse> {
    let admin = require_admin(&state, &identity).await?;
    let target_id = path.into_inner();

    // Admins cannot demote themselves out of the admin console.
    if target_id == admin.id {
        return Err(AppError::BadRequest("You cannot change your own role".to_string()));
    }

    let mut user = state
        .users
        .find_by_id(target_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let previous = user.role;
    user.set_role(body.role);
    let user = state.users.save(user).await?;

    tracing::info!(
        admin_id = %admin.id,
        user_id = %user.id,
        user_email = %mask_email(&user.email),
        from = %previous,
        to = %user.role,
        "Role updated"
    );

    Ok(HttpResponse::Ok().json(user.profile()))
}
