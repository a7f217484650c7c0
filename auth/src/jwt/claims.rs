use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::principal::Principal;

/// Session token claims.
///
/// Exactly the three fields a session credential carries: who it was issued
/// to, when, and until when it is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a principal.
    ///
    /// # Arguments
    /// * `principal` - Identity the token is bound to
    /// * `issued_at` - Unix timestamp of issue
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, iat, and exp = iat + ttl
    pub fn for_principal(principal: &Principal, issued_at: i64, ttl: Duration) -> Self {
        Self {
            sub: principal.as_str().to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl.num_seconds()),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is valid strictly before its expiry; at `exp` it is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Principal named by the subject claim, if any.
    pub fn principal(&self) -> Option<Principal> {
        if self.sub.is_empty() {
            None
        } else {
            Some(Principal::new(&self.sub))
        }
    }
}
