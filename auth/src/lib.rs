//! Authentication utilities library
//!
//! Provides the credential and token primitives the e-book service builds on:
//! - Password hashing (Argon2id) behind the [`CredentialHasher`] trait
//! - Signed, time-limited JWT claims (subject, role, email, expiry)
//! - An [`Authenticator`] holding the signing secret and token lifetimes
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Argon2Hasher, CredentialHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session and Verification Tokens
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(30),
//!     Duration::hours(1),
//! );
//!
//! let session = auth.issue_session_token(1, "user", "alice@example.com").unwrap();
//! let claims = auth.validate_token(&session.access_token).unwrap();
//! assert_eq!(claims.role.as_deref(), Some("user"));
//!
//! let link = auth.issue_verification_token(1, "alice@example.com").unwrap();
//! assert!(auth.validate_token(&link.access_token).unwrap().role.is_none());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::Argon2Hasher;
pub use password::CredentialHasher;
pub use password::PasswordError;
