use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ProfileData;
use crate::domain::profile::models::optional;
use crate::domain::profile::models::parse_date;
use crate::domain::profile::models::required;
use crate::domain::profile::models::EntryId;
use crate::domain::profile::models::NewExperience;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::profile::errors::FieldError;

pub async fn add_experience(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<AddExperienceRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .add_experience(&caller.user_id, body.try_into_experience()?)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

/// Ids that match no entry, or are not ids at all, leave the profile as is.
pub async fn remove_experience(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(exp_id): Path<String>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .remove_experience(&caller.user_id, EntryId::parse(&exp_id))
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddExperienceRequest {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    from: Option<String>,
    to: Option<String>,
    current: bool,
    description: Option<String>,
}

impl AddExperienceRequest {
    fn try_into_experience(self) -> Result<NewExperience, FieldError> {
        let title = required("title", self.title)?;
        let company = required("company", self.company)?;
        let from = parse_date("from", &required("from", self.from)?)?;
        let to = optional(self.to)
            .map(|to| parse_date("to", &to))
            .transpose()?;

        Ok(NewExperience {
            title,
            company,
            location: optional(self.location),
            from,
            to,
            current: self.current,
            description: optional(self.description),
        })
    }
}
