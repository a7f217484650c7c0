use thiserror::Error;

use crate::user::errors::UserError;

/// Error for profile field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be a date (YYYY-MM-DD), got {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// Top-level error for all profile-related operations
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("Invalid profile: {0}")]
    InvalidField(#[from] FieldError),

    #[error("Profile not found for user: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for ProfileError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DatabaseError(msg) => ProfileError::DatabaseError(msg),
            other => ProfileError::Unknown(other.to_string()),
        }
    }
}
