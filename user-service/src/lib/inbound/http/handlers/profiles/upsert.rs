use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ProfileData;
use super::SkillsInput;
use crate::domain::profile::models::optional;
use crate::domain::profile::models::required;
use crate::domain::profile::models::Skills;
use crate::domain::profile::models::UpsertProfileCommand;
use crate::domain::profile::models::Website;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::profile::errors::FieldError;

/// Create the caller's profile or replace its editable fields.
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<UpsertProfileRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .upsert_profile(&caller.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpsertProfileRequest {
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    status: Option<String>,
    githubusername: Option<String>,
    skills: Option<SkillsInput>,
}

impl UpsertProfileRequest {
    fn try_into_command(self) -> Result<UpsertProfileCommand, FieldError> {
        let status = required("status", self.status)?;
        let skills = match self.skills {
            Some(SkillsInput::List(skills)) => Skills::from_list(skills)?,
            Some(SkillsInput::Csv(csv)) => Skills::parse(&csv)?,
            None => return Err(FieldError::Required("skills")),
        };

        Ok(UpsertProfileCommand {
            company: optional(self.company),
            location: optional(self.location),
            website: self.website.as_deref().and_then(Website::new),
            bio: optional(self.bio),
            skills,
            status,
            github_username: optional(self.githubusername),
        })
    }
}
