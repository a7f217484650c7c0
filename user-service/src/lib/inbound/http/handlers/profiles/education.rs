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
use crate::domain::profile::models::NewEducation;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::profile::errors::FieldError;

pub async fn add_education(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<AddEducationRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .add_education(&caller.user_id, body.try_into_education()?)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

pub async fn remove_education(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(edu_id): Path<String>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .remove_education(&caller.user_id, EntryId::parse(&edu_id))
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddEducationRequest {
    school: Option<String>,
    degree: Option<String>,
    fieldofstudy: Option<String>,
    from: Option<String>,
    to: Option<String>,
    current: bool,
    description: Option<String>,
}

impl AddEducationRequest {
    fn try_into_education(self) -> Result<NewEducation, FieldError> {
        let school = required("school", self.school)?;
        let degree = required("degree", self.degree)?;
        let field_of_study = required("fieldofstudy", self.fieldofstudy)?;
        let from = parse_date("from", &required("from", self.from)?)?;
        let to = optional(self.to)
            .map(|to| parse_date("to", &to))
            .transpose()?;

        Ok(NewEducation {
            school,
            degree,
            field_of_study,
            from,
            to,
            current: self.current,
            description: optional(self.description),
        })
    }
}
