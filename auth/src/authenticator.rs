use chrono::Duration;

use crate::jwt::AuthError;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::principal::Principal;

/// Authentication coordinator combining password verification and token handling.
///
/// Built once at startup from immutable configuration (signing secret and
/// token lifetime) and shared read-only between requests.
#[derive(Debug)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
    token_ttl: Duration,
    decoy_digest: String,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Principal the token was issued to
    pub principal: Principal,
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// Wrong password or unknown account; the two are never told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    HashFailure(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy digest used for unknown accounts could not be derived
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let decoy_digest = password_hasher.hash("decoy-password-never-matches")?;

        Ok(Self {
            password_hasher,
            token_issuer: TokenIssuer::new(jwt_secret),
            token_verifier: TokenVerifier::new(jwt_secret),
            token_ttl,
            decoy_digest,
        })
    }

    /// Lifetime of tokens issued by this authenticator.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after registration, where the password was just hashed.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, principal: &Principal) -> Result<String, TokenError> {
        self.token_issuer.issue(principal, self.token_ttl)
    }

    /// Verify credentials and generate a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_digest` - Stored password digest of the account
    /// * `principal` - Account the digest belongs to
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_digest: &str,
        principal: &Principal,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_digest) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(principal)?;

        Ok(AuthenticationResult {
            principal: principal.clone(),
            access_token,
        })
    }

    /// Reject a login attempt for an account that does not exist.
    ///
    /// Runs a full verification against a decoy digest so the response costs
    /// the same as a wrong password, then reports `InvalidCredentials`.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, &self.decoy_digest);
        AuthenticationError::InvalidCredentials
    }

    /// Validate a session token and resolve its principal.
    ///
    /// # Errors
    /// * `Malformed`, `InvalidSignature`, `Expired` - see [`TokenVerifier::verify_at`]
    pub fn validate_token(&self, token: &str) -> Result<Principal, AuthError> {
        self.token_verifier.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET, Duration::hours(1)).expect("Failed to build authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();
        let hasher = PasswordHasher::new();

        let password = "my_password";
        let hash = hasher.hash(password).expect("Failed to hash password");

        let principal = Principal::from("user123");
        let result = authenticator
            .authenticate(password, &hash, &principal)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.principal, principal);

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded, principal);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = PasswordHasher::new()
            .hash("my_password")
            .expect("Failed to hash password");

        let result =
            authenticator.authenticate("wrong_password", &hash, &Principal::from("user123"));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_digest_fails_closed() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("anything", "not-a-digest", &Principal::from("u1"));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unknown_account_matches_wrong_password() {
        let authenticator = authenticator();
        let hash = PasswordHasher::new()
            .hash("my_password")
            .expect("Failed to hash password");

        let wrong_password = authenticator
            .authenticate("guess", &hash, &Principal::from("user123"))
            .unwrap_err();
        let unknown_account = authenticator.reject_unknown_account("guess");

        assert_eq!(wrong_password.to_string(), unknown_account.to_string());
    }

    #[test]
    fn test_issue_token_uses_configured_ttl() {
        let authenticator = authenticator();
        assert_eq!(authenticator.token_ttl(), Duration::hours(1));

        let token = authenticator
            .issue_token(&Principal::from("user123"))
            .expect("Failed to generate token");

        let principal = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");
        assert_eq!(principal.as_str(), "user123");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let authenticator =
            Authenticator::new(SECRET, Duration::seconds(-1)).expect("Failed to build authenticator");

        let token = authenticator
            .issue_token(&Principal::from("user123"))
            .expect("Failed to generate token");

        assert_eq!(
            authenticator.validate_token(&token),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert_eq!(result, Err(AuthError::Malformed));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let rendered = format!("{:?}", authenticator());
        assert!(!rendered.contains("test_secret_key"));
    }
}
