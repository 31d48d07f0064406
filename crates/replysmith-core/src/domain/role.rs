use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Access tier stored on every account.
///
/// `Interested` is the trial tier: it can sign in and see its account but is
/// shown an upgrade prompt instead of running generations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    #[default]
    #[serde(alias = "trial", alias = "TRIAL")]
    Interested,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Interested];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Interested => "interested",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "interested" | "trial" => Ok(Role::Interested),
            other => Err(DomainError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

/// Where an account stands relative to its trial end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TrialStatus {
    NotOnTrial,
    Active { days_remaining: i64 },
    Expired,
}

impl TrialStatus {
    /// Evaluate a trial end date against `now`.
    ///
    /// Only the trial tier has a trial; a stale `trial_ends_at` left on a
    /// promoted account is ignored. Partial days round up, so a trial ending
    /// in three hours still reports one day remaining.
    pub fn evaluate(role: Role, trial_ends_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(ends_at) = trial_ends_at.filter(|_| role == Role::Interested) else {
            return TrialStatus::NotOnTrial;
        };

        if ends_at <= now {
            return TrialStatus::Expired;
        }

        let remaining = (ends_at - now).num_milliseconds();
        TrialStatus::Active {
            days_remaining: (remaining + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_trial_alias_parses_to_interested() {
        assert_eq!("TRIAL".parse::<Role>().unwrap(), Role::Interested);
        let role: Role = serde_json::from_str("\"trial\"").unwrap();
        assert_eq!(role, Role::Interested);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"interested\"");
    }

    #[test]
    fn test_trial_days_round_up() {
        let now = Utc::now();
        let status = TrialStatus::evaluate(
            Role::Interested,
            Some(now + TimeDelta::hours(3)),
            now,
        );
        assert_eq!(status, TrialStatus::Active { days_remaining: 1 });

        let status = TrialStatus::evaluate(
            Role::Interested,
            Some(now + TimeDelta::days(6) + TimeDelta::minutes(1)),
            now,
        );
        assert_eq!(status, TrialStatus::Active { days_remaining: 7 });
    }

    #[test]
    fn test_trial_expired_and_absent() {
        let now = Utc::now();
        assert_eq!(
            TrialStatus::evaluate(Role::Interested, Some(now - TimeDelta::days(1)), now),
            TrialStatus::Expired
        );
        assert_eq!(
            TrialStatus::evaluate(Role::Interested, None, now),
            TrialStatus::NotOnTrial
        );
        assert_eq!(
            TrialStatus::evaluate(Role::User, Some(now + TimeDelta::days(3)), now),
            TrialStatus::NotOnTrial
        );
    }

    #[test]
    fn test_trial_status_wire_shape() {
        let json = serde_json::to_value(TrialStatus::Active { days_remaining: 2 }).unwrap();
        assert_eq!(json["state"], "active");
        assert_eq!(json["daysRemaining"], 2);
    }
}
