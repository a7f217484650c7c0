use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Transaction;
use uuid::Uuid;

use crate::domain::profile::models::Education;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileChange;
use crate::domain::profile::models::Skills;
use crate::domain::profile::models::Website;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::user::models::UserId;
use crate::profile::errors::ProfileError;

/// Profile storage; experience and education are kept as JSONB arrays.
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    company: Option<String>,
    location: Option<String>,
    website: Option<String>,
    bio: Option<String>,
    skills: Vec<String>,
    status: String,
    github_username: Option<String>,
    experience: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = ProfileError;

    /// Stored rows that no longer pass validation are a storage fault.
    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let skills = Skills::from_list(row.skills).map_err(|e| {
            ProfileError::DatabaseError(format!("Corrupt profile row {}: {}", row.user_id, e))
        })?;

        Ok(Profile {
            user_id: UserId(row.user_id),
            company: row.company,
            location: row.location,
            website: row.website.as_deref().and_then(Website::new),
            bio: row.bio,
            skills,
            status: row.status,
            github_username: row.github_username,
            experience: row.experience.0,
            education: row.education.0,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ProfileError {
    ProfileError::DatabaseError(e.to_string())
}

async fn lock_profile(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &UserId,
) -> Result<Option<Profile>, ProfileError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT user_id, company, location, website, bio, skills, status,
               github_username, experience, education, updated_at
        FROM profiles
        WHERE user_id = $1
        FOR UPDATE
        "#,
    )
    .bind(user_id.0)
    .fetch_optional(&mut **tx)
    .await
    .map_err(database_error)?;

    row.map(Profile::try_from).transpose()
}

async fn write_profile(
    tx: &mut Transaction<'_, Postgres>,
    profile: &Profile,
) -> Result<(), ProfileError> {
    sqlx::query(
        r#"
        UPDATE profiles
        SET company = $2,
            location = $3,
            website = $4,
            bio = $5,
            skills = $6,
            status = $7,
            github_username = $8,
            experience = $9,
            education = $10,
            updated_at = $11
        WHERE user_id = $1
        "#,
    )
    .bind(profile.user_id.0)
    .bind(&profile.company)
    .bind(&profile.location)
    .bind(profile.website.as_ref().map(|w| w.as_str().to_string()))
    .bind(&profile.bio)
    .bind(profile.skills.as_slice().to_vec())
    .bind(&profile.status)
    .bind(&profile.github_username)
    .bind(Json(&profile.experience))
    .bind(Json(&profile.education))
    .bind(profile.updated_at)
    .execute(&mut **tx)
    .await
    .map_err(database_error)?;

    Ok(())
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, company, location, website, bio, skills, status,
                   github_username, experience, education, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Profile::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, company, location, website, bio, skills, status,
                   github_username, experience, education, updated_at
            FROM profiles
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    async fn insert(&self, profile: &Profile) -> Result<bool, ProfileError> {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (user_id, company, location, website, bio, skills, status,
                                  github_username, experience, education, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(profile.user_id.0)
        .bind(&profile.company)
        .bind(&profile.location)
        .bind(profile.website.as_ref().map(|w| w.as_str().to_string()))
        .bind(&profile.bio)
        .bind(profile.skills.as_slice().to_vec())
        .bind(&profile.status)
        .bind(&profile.github_username)
        .bind(Json(&profile.experience))
        .bind(Json(&profile.education))
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(
        &self,
        user_id: &UserId,
        change: ProfileChange,
    ) -> Result<Option<Profile>, ProfileError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Dropping the transaction rolls it back and releases the row lock
        let Some(mut profile) = lock_profile(&mut tx, user_id).await? else {
            return Ok(None);
        };

        profile.change(change);
        write_profile(&mut tx, &profile).await?;
        tx.commit().await.map_err(database_error)?;

        Ok(Some(profile))
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError> {
        let result = sqlx::query(
            r#"
            DELETE FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
