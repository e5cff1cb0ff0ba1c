use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::Argon2Hasher;
use crate::password::CredentialHasher;
use crate::password::PasswordError;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the process-wide signing secret and the two token lifetimes: a short
/// session window for logins and a longer window for email verification links.
pub struct Authenticator {
    hasher: Box<dyn CredentialHasher>,
    jwt_handler: JwtHandler,
    session_ttl: Duration,
    verification_ttl: Duration,
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded JWT
    pub access_token: String,
    /// Instant after which the token no longer validates
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator backed by Argon2id.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `session_ttl` - Lifetime of login tokens
    /// * `verification_ttl` - Lifetime of email verification tokens
    pub fn new(jwt_secret: &[u8], session_ttl: Duration, verification_ttl: Duration) -> Self {
        Self {
            hasher: Box::new(Argon2Hasher::new()),
            jwt_handler: JwtHandler::new(jwt_secret),
            session_ttl,
            verification_ttl,
        }
    }

    /// Replace the password hasher.
    pub fn with_hasher(mut self, hasher: impl CredentialHasher + 'static) -> Self {
        self.hasher = Box::new(hasher);
        self
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn verification_ttl(&self) -> Duration {
        self.verification_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Sign a session token carrying subject, role and email.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_session_token(
        &self,
        subject: impl ToString,
        role: &str,
        email: &str,
    ) -> Result<IssuedToken, JwtError> {
        self.sign(&Claims::for_session(subject, role, email, self.session_ttl))
    }

    /// Sign a role-less verification token carrying subject and email.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_verification_token(
        &self,
        subject: impl ToString,
        email: &str,
    ) -> Result<IssuedToken, JwtError> {
        self.sign(&Claims::for_verification(
            subject,
            email,
            self.verification_ttl,
        ))
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<IssuedToken, JwtError> {
        Ok(IssuedToken {
            access_token: self.jwt_handler.encode(claims)?,
            expires_at: claims.expires_at(),
        })
    }

    /// Validate and decode a token.
    ///
    /// The claims are returned as signed; nothing is re-checked against storage.
    ///
    /// # Errors
    /// * `JwtError` - Token is expired, forged or malformed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET, Duration::minutes(30), Duration::hours(1))
            .with_hasher(Argon2Hasher::with_params(8, 1, 1).expect("Failed to build hasher"))
    }

    #[test]
    fn test_verify_password_success() {
        let authenticator = authenticator();
        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert_eq!(authenticator.verify_password("my_password", &hash), Ok(()));
    }

    #[test]
    fn test_verify_password_mismatch() {
        let authenticator = authenticator();
        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert_eq!(
            authenticator.verify_password("wrong_password", &hash),
            Err(AuthenticationError::InvalidCredentials)
        );
    }

    #[test]
    fn test_session_token_round_trip() {
        let authenticator = authenticator();

        let issued = authenticator
            .issue_session_token(5, "user", "alice@example.com")
            .expect("Failed to issue token");
        let claims = authenticator
            .validate_token(&issued.access_token)
            .expect("Token validation failed");

        assert_eq!(claims.sub, "5");
        assert_eq!(claims.role.as_deref(), Some("user"));
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert_eq!(claims.expires_at(), issued.expires_at);
    }

    #[test]
    fn test_verification_token_has_no_role_and_longer_ttl() {
        let authenticator = authenticator();

        let issued = authenticator
            .issue_verification_token(5, "alice@example.com")
            .expect("Failed to issue token");
        let claims = authenticator
            .validate_token(&issued.access_token)
            .expect("Token validation failed");

        assert!(claims.role.is_none());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_validate_elapsed_token() {
        let authenticator = authenticator();
        let claims = Claims::new(
            5,
            "alice@example.com",
            Utc::now() - Duration::minutes(31),
            Duration::minutes(30),
        )
        .with_role("user");

        let issued = authenticator.sign(&claims).expect("Failed to sign claims");

        assert_eq!(
            authenticator.validate_token(&issued.access_token),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let result = authenticator().validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
