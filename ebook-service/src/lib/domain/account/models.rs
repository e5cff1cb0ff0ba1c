use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::UsernameError;
use crate::domain::account::principal::Role;
use crate::domain::identifier::parse_id;
use crate::domain::identifier::IdError;

/// Registered customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    pub is_admin: bool,
    /// Admin that created this account, if it was not self-registered
    pub created_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
}

/// Staff account. Admins have no email verification gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: AdminId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `IdError` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        parse_id(s).map(UserId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Admin unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdminId(pub i64);

impl AdminId {
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        parse_id(s).map(AdminId)
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 3-32 characters, alphanumeric plus underscore and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains characters other than alphanumerics, `_` and `-`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UsernameError::InvalidCharacters);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format with an RFC 5322 parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User row to insert. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    pub created_by: Option<AdminId>,
}

/// Admin row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Validated username, email and plaintext password for a new account.
///
/// Used for self-registration, admin-created users and new admins.
#[derive(Debug)]
pub struct CreateAccountCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl CreateAccountCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Partial user update. Only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
}

/// Login attempt. The email is deliberately not validated so a malformed
/// address fails like any other unknown one.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Configured superadmin credential pair.
#[derive(Clone)]
pub struct SuperadminCredentials {
    email: String,
    password: String,
}

impl SuperadminCredentials {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Exact match on both fields. Blank configuration never matches.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        !self.email.is_empty()
            && !self.password.is_empty()
            && self.email == email
            && constant_time_eq(self.password.as_bytes(), password.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

impl fmt::Debug for SuperadminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperadminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

/// Successful registration: the unverified user and the token mailed to them.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub verification_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
}

/// Verification link request handed to the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub user_id: UserId,
    pub username: Username,
    pub recipient: EmailAddress,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
