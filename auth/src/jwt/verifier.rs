use std::fmt;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::AuthError;
use crate::principal::Principal;

/// Validates session tokens and resolves the principal they were issued to.
///
/// Checks run in a fixed order: structure, then signature, then expiry. The
/// library's own expiry check is disabled so that expiry is judged against
/// the caller-supplied clock with no leeway.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a new verifier with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key the tokens were signed with
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// See [`TokenVerifier::verify_at`].
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// # Arguments
    /// * `token` - Serialized JWT string
    /// * `now` - Unix timestamp to judge expiry against
    ///
    /// # Returns
    /// Principal named by the token's subject
    ///
    /// # Errors
    /// * `Malformed` - Not a structurally valid token, or its claims are unreadable
    /// * `InvalidSignature` - Signature does not verify against the secret
    /// * `Expired` - `now` is at or past the token's expiry
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Principal, AuthError> {
        decode_header(token).map_err(|_| AuthError::Malformed)?;

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?
            .claims;

        if claims.is_expired(now) {
            return Err(AuthError::Expired);
        }

        claims.principal().ok_or(AuthError::Malformed)
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        // A token declaring another algorithm cannot carry our signature
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}
