//! In-memory user repository, used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use replysmith_core::domain::User;
use replysmith_core::error::RepoError;
use replysmith_core::ports::{BaseRepository, UserRepository};

/// Process-local user store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    /// Upsert keyed by id; a different account with the same email is a
    /// constraint violation, mirroring the unique index on `users.email`.
    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|existing| existing.id != user.id && existing.email == user.email)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use replysmith_core::domain::Role;

    fn user(email: &str) -> User {
        User::new(email.to_string(), "hash".to_string(), Role::Interested)
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(user("a@b.co")).await.unwrap();

        assert_eq!(repo.find_by_id(saved.id).await.unwrap().unwrap().email, "a@b.co");
        assert_eq!(repo.find_by_email("a@b.co").await.unwrap().unwrap().id, saved.id);
        assert!(repo.find_by_email("z@b.co").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_constraint_error() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("a@b.co")).await.unwrap();

        let err = repo.save(user("a@b.co")).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_save_updates_existing() {
        let repo = InMemoryUserRepository::new();
        let mut saved = repo.save(user("a@b.co")).await.unwrap();

        saved.set_role(Role::Admin);
        repo.save(saved.clone()).await.unwrap();

        assert_eq!(repo.find_by_id(saved.id).await.unwrap().unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryUserRepository::new();
        let mut older = user("old@b.co");
        older.created_at -= TimeDelta::days(1);
        repo.save(older).await.unwrap();
        repo.save(user("new@b.co")).await.unwrap();

        let emails: Vec<String> = repo.list().await.unwrap().into_iter().map(|u| u.email).collect();

        assert_eq!(emails, vec!["new@b.co", "old@b.co"]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = InMemoryUserRepository::new();

        assert!(matches!(repo.delete(Uuid::new_v4()).await, Err(RepoError::NotFound)));
    }
}
