//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use replysmith_core::domain::{Role, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub trial_ends_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Unknown role strings degrade to the trial tier.
impl From<Model> for User {
    fn from(model: Model) -> Self {
        let role = model.role.parse::<Role>().unwrap_or_else(|_| {
            tracing::warn!(user_id = %model.id, role = %model.role, "Unknown stored role");
            Role::Interested
        });

        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            role,
            trial_ends_at: model.trial_ends_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(user.id),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_string()),
            trial_ends_at: Set(user.trial_ends_at.map(Into::into)),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
