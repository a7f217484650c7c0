use async_trait::async_trait;

use crate::profile::errors::ProfileError;
use crate::profile::models::EntryId;
use crate::profile::models::NewEducation;
use crate::profile::models::NewExperience;
use crate::profile::models::Profile;
use crate::profile::models::ProfileChange;
use crate::profile::models::ProfileView;
use crate::profile::models::UpsertProfileCommand;
use crate::user::models::UserId;

/// Port for profile domain service operations.
///
/// Every operation takes the owner's id as resolved by the auth gate or the
/// request path; no operation checks credentials itself.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Create the user's profile or replace its editable fields.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn upsert_profile(
        &self,
        user_id: &UserId,
        command: UpsertProfileCommand,
    ) -> Result<ProfileView, ProfileError>;

    /// Retrieve a user's profile with its owner's name.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, user_id: &UserId) -> Result<ProfileView, ProfileError>;

    /// Retrieve all profiles with their owners' names.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_profiles(&self) -> Result<Vec<ProfileView>, ProfileError>;

    /// Prepend an experience entry.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn add_experience(
        &self,
        user_id: &UserId,
        experience: NewExperience,
    ) -> Result<ProfileView, ProfileError>;

    /// Remove an experience entry; unknown entry ids are ignored.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<ProfileView, ProfileError>;

    /// Prepend an education entry.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn add_education(
        &self,
        user_id: &UserId,
        education: NewEducation,
    ) -> Result<ProfileView, ProfileError>;

    /// Remove an education entry; unknown entry ids are ignored.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile
    /// * `DatabaseError` - Database operation failed
    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<ProfileView, ProfileError>;

    /// Delete a user's profile; succeeds when there is none.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_profile(&self, user_id: &UserId) -> Result<(), ProfileError>;
}

/// Persistence operations for profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Retrieve the profile owned by a user.
    ///
    /// # Returns
    /// Optional profile (None if the user has none)
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError>;

    /// Retrieve all profiles, most recently updated first.
    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError>;

    /// Insert a profile unless its owner already has one.
    ///
    /// # Returns
    /// Whether the profile was inserted
    async fn insert(&self, profile: &Profile) -> Result<bool, ProfileError>;

    /// Apply a change to the owner's profile. Concurrent changes to one
    /// profile are serialized; none is lost.
    ///
    /// # Returns
    /// Changed profile (None if the user has none)
    async fn update(
        &self,
        user_id: &UserId,
        change: ProfileChange,
    ) -> Result<Option<Profile>, ProfileError>;

    /// Remove the profile owned by a user.
    ///
    /// # Returns
    /// Whether a profile was removed
    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError>;
}
