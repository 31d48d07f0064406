//! Role gate.
//!
//! Every gated action asks these predicates with the caller's freshly loaded
//! role; nothing here caches a decision.

use chrono::{DateTime, Utc};

use crate::domain::{Role, TrialStatus};

/// Message shown to trial accounts instead of running a generation.
pub const UPGRADE_MESSAGE: &str =
    "Your account has limited access. Contact us to upgrade for full analysis and comment generation.";

/// Outcome of gating a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    UpgradeRequired,
}

/// Whether `role` may run analysis and comment generation.
pub fn can_generate(role: Role) -> bool {
    matches!(role, Role::Admin | Role::User)
}

/// Whether `role` may list users and change their roles.
pub fn can_manage_users(role: Role) -> bool {
    role == Role::Admin
}

pub fn gate_generation(role: Role) -> GateDecision {
    if can_generate(role) {
        GateDecision::Allowed
    } else {
        GateDecision::UpgradeRequired
    }
}

/// Account-page description of a role.
pub fn role_description(role: Role) -> &'static str {
    match role {
        Role::Admin => "Full administrative access to all features and user management",
        Role::User => "Full access to all analysis and comment generation features",
        Role::Interested => "Limited access - contact us to upgrade for full features",
    }
}

/// Trial standing of an account, for display next to its role.
pub fn trial_status(
    role: Role,
    trial_ends_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TrialStatus {
    TrialStatus::evaluate(role, trial_ends_at, now)
}
