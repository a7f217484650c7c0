use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileChange;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::profile::errors::ProfileError;
use crate::user::errors::UserError;

/// Process-local user storage, used when no database is configured.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        // Emails are unique, as the users_email_key constraint enforces in Postgres
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

/// Process-local profile storage, used when no database is configured.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError> {
        let mut profiles: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        profiles.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(profiles)
    }

    async fn insert(&self, profile: &Profile) -> Result<bool, ProfileError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.user_id) {
            return Ok(false);
        }
        profiles.insert(profile.user_id, profile.clone());
        Ok(true)
    }

    async fn update(
        &self,
        user_id: &UserId,
        change: ProfileChange,
    ) -> Result<Option<Profile>, ProfileError> {
        // Read, change and write back under one write lock
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(user_id).map(|profile| {
            profile.change(change);
            profile.clone()
        }))
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError> {
        Ok(self.profiles.write().await.remove(user_id).is_some())
    }
}
