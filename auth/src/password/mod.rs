pub mod argon2;
pub mod errors;

pub use self::argon2::Argon2Hasher;
pub use errors::PasswordError;

/// One-way password hashing capability.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch and an error only when the stored hash
    /// cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}
