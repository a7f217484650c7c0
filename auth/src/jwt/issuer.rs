use std::fmt;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;
use crate::principal::Principal;

/// Issues signed, time-bounded session tokens.
///
/// Uses HS256 (HMAC with SHA-256). The secret is consumed at construction and
/// never exposed again, not even through `Debug`.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a new issuer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be at least 32 bytes)
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for a principal, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, principal: &Principal, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(principal, ttl, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `issued_at`.
    ///
    /// # Arguments
    /// * `principal` - Identity to bind the token to
    /// * `ttl` - Token lifetime
    /// * `issued_at` - Unix timestamp used for `iat`; `exp` is `iat + ttl`
    ///
    /// # Returns
    /// Serialized JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        principal: &Principal,
        ttl: Duration,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_principal(principal, issued_at, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
