use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::NotifierError;
use crate::domain::account::models::Admin;
use crate::domain::account::models::AdminId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewAdmin;
use crate::domain::account::models::NewUser;
use crate::domain::account::models::Registration;
use crate::domain::account::models::Session;
use crate::domain::account::models::UpdateUserCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::VerificationEmail;
use crate::domain::account::models::VerificationOutcome;
use crate::domain::account::principal::Principal;

/// Port for account, session and verification operations.
///
/// Operations taking an `actor` enforce their role gate before touching
/// storage.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new unverified user and send the verification email.
    ///
    /// # Arguments
    /// * `command` - Validated username, email and password
    ///
    /// # Returns
    /// Created user and the verification token mailed to them
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateAccountCommand) -> Result<Registration, AccountError>;

    /// Mark the user named by a verification token as verified.
    ///
    /// Idempotent: an already verified user is reported as such and not written.
    ///
    /// # Errors
    /// * `InvalidVerificationToken` - Token is expired, forged, malformed or a session token
    /// * `UserNotFound` - User was deleted after the token was issued
    /// * `DatabaseError` - Database operation failed
    async fn confirm_verification(&self, token: &str)
        -> Result<VerificationOutcome, AccountError>;

    /// Exchange credentials for a session token.
    ///
    /// Checks the configured superadmin, then admins, then users.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No principal matches the email and password
    /// * `Unverified` - User credentials are correct but the email is not verified
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError>;

    /// Resolve a bearer token into the principal it names.
    ///
    /// # Errors
    /// * `Access(Unauthorized)` - Token is invalid, role-less, or names a missing row
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, token: &str) -> Result<Principal, AccountError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, AccountError>;

    /// List every user. Admin tier.
    async fn list_users(&self, actor: &Principal) -> Result<Vec<User>, AccountError>;

    /// Create a verified user on behalf of an admin-tier principal.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not admin tier
    /// * `EmailAlreadyExists` / `UsernameAlreadyExists` - Uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn create_user(
        &self,
        actor: &Principal,
        command: CreateAccountCommand,
    ) -> Result<User, AccountError>;

    /// Partially update a user. The user themself or admin tier.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is neither the user nor admin tier
    /// * `UserNotFound` - User does not exist
    /// * `EmailAlreadyExists` / `UsernameAlreadyExists` - Uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        actor: &Principal,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, AccountError>;

    /// Delete a user and everything they own. The user themself or admin tier.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is neither the user nor admin tier
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, actor: &Principal, id: &UserId) -> Result<User, AccountError>;

    /// Grant a user the admin role. Superadmin only.
    async fn promote_user(&self, actor: &Principal, id: &UserId) -> Result<User, AccountError>;

    /// Return a user to the user role. Superadmin only.
    async fn demote_user(&self, actor: &Principal, id: &UserId) -> Result<User, AccountError>;

    /// Number of registered users. Admin tier.
    async fn count_users(&self, actor: &Principal) -> Result<i64, AccountError>;

    /// List every admin. Superadmin only.
    async fn list_admins(&self, actor: &Principal) -> Result<Vec<Admin>, AccountError>;

    /// Create an admin. Superadmin only.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not the superadmin
    /// * `EmailAlreadyExists` / `UsernameAlreadyExists` - Uniqueness violated among admins
    /// * `DatabaseError` - Database operation failed
    async fn create_admin(
        &self,
        actor: &Principal,
        command: CreateAccountCommand,
    ) -> Result<Admin, AccountError>;

    /// Delete an admin and the users it created. Superadmin only.
    ///
    /// # Errors
    /// * `Access(Forbidden)` - Actor is not the superadmin
    /// * `AdminNotFound` - Admin does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_admin(&self, actor: &Principal, id: &AdminId) -> Result<(), AccountError>;
}

/// Persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user. The store assigns the identifier and timestamp.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, AccountError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Retrieve user by email address. Exact match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Retrieve all users.
    async fn list_all(&self) -> Result<Vec<User>, AccountError>;

    /// Write every mutable field of an existing user.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, AccountError>;

    /// Remove a user. Owned rows cascade.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), AccountError>;

    /// Number of stored users.
    async fn count(&self) -> Result<i64, AccountError>;
}

/// Persistence operations for admins.
#[async_trait]
pub trait AdminRepository: Send + Sync + 'static {
    /// Persist a new admin.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken by an admin
    /// * `EmailAlreadyExists` - Email is already used by an admin
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, admin: NewAdmin) -> Result<Admin, AccountError>;

    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, AccountError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AccountError>;

    async fn list_all(&self) -> Result<Vec<Admin>, AccountError>;

    /// Remove an admin. Users it created cascade.
    ///
    /// # Errors
    /// * `AdminNotFound` - Admin does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AdminId) -> Result<(), AccountError>;
}

/// Outbound delivery of verification emails.
#[async_trait]
pub trait VerificationNotifier: Send + Sync + 'static {
    /// Hand a verification email over for delivery.
    ///
    /// Returning `Ok` means the request was accepted, not that it was delivered.
    ///
    /// # Errors
    /// * `SerializationFailed` - Message serialization failed
    /// * `PublishFailed` - Failed to enqueue with the broker
    async fn send_verification(&self, email: &VerificationEmail) -> Result<(), NotifierError>;
}
