use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::profile::errors::ProfileError;
use crate::profile::models::EntryId;
use crate::profile::models::NewEducation;
use crate::profile::models::NewExperience;
use crate::profile::models::Profile;
use crate::profile::models::ProfileChange;
use crate::profile::models::ProfileView;
use crate::profile::models::UpsertProfileCommand;
use crate::profile::ports::ProfileRepository;
use crate::profile::ports::ProfileServicePort;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for profile operations.
///
/// Reads owner names from the user repository to populate views.
pub struct ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    profiles: Arc<PR>,
    users: Arc<UR>,
}

impl<PR, UR> ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    /// Create a new profile service with injected dependencies.
    ///
    /// # Arguments
    /// * `profiles` - Profile persistence implementation
    /// * `users` - User persistence implementation (read only)
    pub fn new(profiles: Arc<PR>, users: Arc<UR>) -> Self {
        Self { profiles, users }
    }

    async fn existing(&self, user_id: &UserId) -> Result<Profile, ProfileError> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))
    }

    async fn view(&self, profile: Profile) -> Result<ProfileView, ProfileError> {
        let owner_name = self
            .users
            .find_by_id(&profile.user_id)
            .await?
            .map(|user| user.name.as_str().to_string());

        Ok(ProfileView {
            profile,
            owner_name,
        })
    }

    async fn changed(
        &self,
        user_id: &UserId,
        change: ProfileChange,
    ) -> Result<ProfileView, ProfileError> {
        let profile = self
            .profiles
            .update(user_id, change)
            .await?
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))?;
        self.view(profile).await
    }
}

#[async_trait]
impl<PR, UR> ProfileServicePort for ProfileService<PR, UR>
where
    PR: ProfileRepository,
    UR: UserRepository,
{
    async fn upsert_profile(
        &self,
        user_id: &UserId,
        command: UpsertProfileCommand,
    ) -> Result<ProfileView, ProfileError> {
        let replace = ProfileChange::Replace(command.clone());
        if let Some(profile) = self.profiles.update(user_id, replace.clone()).await? {
            return self.view(profile).await;
        }

        let profile = Profile::new(*user_id, command);
        if self.profiles.insert(&profile).await? {
            tracing::debug!(user_id = %user_id, "Profile created");
            return self.view(profile).await;
        }

        // Another request created the profile in the meantime
        self.changed(user_id, replace).await
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<ProfileView, ProfileError> {
        let profile = self.existing(user_id).await?;
        self.view(profile).await
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileView>, ProfileError> {
        let profiles = self.profiles.list_all().await?;

        let owner_ids: Vec<UserId> = profiles.iter().map(|p| p.user_id).collect();
        let owners: HashMap<UserId, String> = self
            .users
            .find_by_ids(&owner_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.name.as_str().to_string()))
            .collect();

        Ok(profiles
            .into_iter()
            .map(|profile| ProfileView {
                owner_name: owners.get(&profile.user_id).cloned(),
                profile,
            })
            .collect())
    }

    async fn add_experience(
        &self,
        user_id: &UserId,
        experience: NewExperience,
    ) -> Result<ProfileView, ProfileError> {
        self.changed(user_id, ProfileChange::AddExperience(experience))
            .await
    }

    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<ProfileView, ProfileError> {
        match entry_id {
            Some(id) => self.changed(user_id, ProfileChange::RemoveExperience(id)).await,
            None => self.get_profile(user_id).await,
        }
    }

    async fn add_education(
        &self,
        user_id: &UserId,
        education: NewEducation,
    ) -> Result<ProfileView, ProfileError> {
        self.changed(user_id, ProfileChange::AddEducation(education))
            .await
    }

    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<ProfileView, ProfileError> {
        match entry_id {
            Some(id) => self.changed(user_id, ProfileChange::RemoveEducation(id)).await,
            None => self.get_profile(user_id).await,
        }
    }

    async fn delete_profile(&self, user_id: &UserId) -> Result<(), ProfileError> {
        if self.profiles.delete_by_user(user_id).await? {
            tracing::debug!(user_id = %user_id, "Profile deleted");
        }
        Ok(())
    }
}
