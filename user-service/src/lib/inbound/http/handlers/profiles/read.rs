use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ProfileData;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_current_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .get_profile(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    let views = state.profile_service.list_profiles().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        views.iter().map(ProfileData::from).collect(),
    ))
}

/// Public lookup; an id that is not a UUID cannot own a profile.
pub async fn get_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let user_id = UserId::from_string(&user_id)
        .map_err(|_| ApiError::NotFound("Profile not found".to_string()))?;

    state
        .profile_service
        .get_profile(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}
