use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error: an unreadable digest simply does
/// not match. Only producing a digest can fail.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
