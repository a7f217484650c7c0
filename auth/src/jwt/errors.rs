use thiserror::Error;

/// Reasons a presented credential is rejected.
///
/// Distinguishable internally for diagnostics; callers present all of them
/// to clients as a single "unauthorized" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No token was presented")]
    Missing,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

/// Error type for token issuing.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
