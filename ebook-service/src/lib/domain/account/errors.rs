use thiserror::Error;

use crate::domain::identifier::IdError;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Access control failures shared by every aggregate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// No usable identity: missing, invalid or expired token.
    #[error("{0}")]
    Unauthorized(String),

    /// Identity resolved but not allowed to perform the action.
    #[error("{0}")]
    Forbidden(String),
}

/// Error for verification email delivery
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to serialize notification: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish notification to broker: {0}")]
    PublishFailed(String),
}

/// Top-level error for account, session and verification operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid user ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Admin not found: {0}")]
    AdminNotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please verify your email before logging in.")]
    Unverified,

    #[error("Invalid or expired token")]
    InvalidVerificationToken,

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}

impl From<auth::JwtError> for AccountError {
    fn from(err: auth::JwtError) -> Self {
        AccountError::TokenIssuance(err.to_string())
    }
}
