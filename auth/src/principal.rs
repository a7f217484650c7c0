use std::fmt;

/// Identity resolved from a valid token.
///
/// Opaque account identifier. Nothing else in a token is trusted; callers
/// that need account details fetch them fresh from storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal(String);

impl Principal {
    /// Wrap an account identifier.
    pub fn new(id: impl ToString) -> Self {
        Self(id.to_string())
    }

    /// Get the account identifier as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
