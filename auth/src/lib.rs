//! Authentication core library
//!
//! Provides the authentication building blocks for the user service:
//! - Password hashing (Argon2id)
//! - Session token issuing and verification (JWT, HS256)
//! - Authentication coordination
//!
//! Everything here is synchronous and side-effect free apart from reading the
//! process clock. Configuration (signing secret, token lifetime) is passed in
//! at construction and never read from ambient state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest));
//! assert!(!hasher.verify("not_my_password", &digest));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{AuthError, Principal, TokenIssuer, TokenVerifier};
//! use chrono::Duration;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret);
//! let verifier = TokenVerifier::new(secret);
//!
//! let token = issuer
//!     .issue_at(&Principal::from("u1"), Duration::seconds(3600), 1_000)
//!     .unwrap();
//! assert_eq!(verifier.verify_at(&token, 1_010), Ok(Principal::from("u1")));
//! assert_eq!(verifier.verify_at(&token, 4_601), Err(AuthError::Expired));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, Principal};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1)).unwrap();
//!
//! // Register: hash password
//! let digest = PasswordHasher::new().hash("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", &digest, &Principal::from("user123"))
//!     .unwrap();
//!
//! // Validate token
//! let principal = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(principal.as_str(), "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod principal;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::AuthError;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use principal::Principal;
