use auth::AuthenticationError;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Exchange email and password for a session token.
///
/// An unknown email and a wrong password produce the same 401 response.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let password = Password::new(body.password).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = match state.user_service.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(UserError::NotFoundByEmail(_)) => {
            tracing::info!("Login rejected: invalid credentials");
            return Err(state
                .authenticator
                .reject_unknown_account(password.as_str())
                .into());
        }
        Err(e) => return Err(e.into()),
    };

    let result = state
        .authenticator
        .authenticate(password.as_str(), &user.password_hash, &user.principal())
        .inspect_err(|e| {
            if matches!(e, AuthenticationError::InvalidCredentials) {
                tracing::info!("Login rejected: invalid credentials");
            }
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}
