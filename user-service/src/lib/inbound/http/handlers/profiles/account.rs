use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Remove the caller's profile, then the account itself.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state.profile_service.delete_profile(&caller.user_id).await?;
    state.user_service.delete_user(&caller.user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "User deleted".to_string(),
        },
    ))
}
