use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Signed token payload.
///
/// Session tokens carry a `role`; verification tokens leave it out so they can
/// never be presented as a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (string-encoded principal identifier)
    pub sub: String,

    /// Role tag of the principal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Email address of the principal
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create role-less claims valid for `ttl` from `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier
    /// * `email` - Principal email address
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Validity window
    ///
    /// # Returns
    /// Claims with `exp = issued_at + ttl`
    pub fn new(
        subject: impl ToString,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            role: None,
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Claims for a login session issued now.
    pub fn for_session(
        subject: impl ToString,
        role: impl Into<String>,
        email: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self::new(subject, email, Utc::now(), ttl).with_role(role)
    }

    /// Claims for an email verification link issued now.
    pub fn for_verification(subject: impl ToString, email: impl Into<String>, ttl: Duration) -> Self {
        Self::new(subject, email, Utc::now(), ttl)
    }

    /// Set role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
