use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::account::errors::AccessError;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Admin;
use crate::domain::account::models::AdminId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewAdmin;
use crate::domain::account::models::NewUser;
use crate::domain::account::models::Registration;
use crate::domain::account::models::Session;
use crate::domain::account::models::SuperadminCredentials;
use crate::domain::account::models::UpdateUserCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::VerificationEmail;
use crate::domain::account::models::VerificationOutcome;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::AdminRepository;
use crate::domain::account::ports::UserRepository;
use crate::domain::account::ports::VerificationNotifier;
use crate::domain::account::principal::Principal;
use crate::domain::account::principal::Role;

/// Subject carried by superadmin session tokens.
const SUPERADMIN_SUBJECT: &str = "0";

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<UR, AR, VN>
where
    UR: UserRepository,
    AR: AdminRepository,
    VN: VerificationNotifier,
{
    users: Arc<UR>,
    admins: Arc<AR>,
    notifier: Arc<VN>,
    authenticator: Arc<Authenticator>,
    superadmin: Option<SuperadminCredentials>,
}

impl<UR, AR, VN> AccountService<UR, AR, VN>
where
    UR: UserRepository,
    AR: AdminRepository,
    VN: VerificationNotifier,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `admins` - Admin persistence implementation
    /// * `notifier` - Verification email delivery
    /// * `authenticator` - Password hashing and token signing
    /// * `superadmin` - Configured superadmin credentials, if any
    pub fn new(
        users: Arc<UR>,
        admins: Arc<AR>,
        notifier: Arc<VN>,
        authenticator: Arc<Authenticator>,
        superadmin: Option<SuperadminCredentials>,
    ) -> Self {
        Self {
            users,
            admins,
            notifier,
            authenticator,
            superadmin,
        }
    }

    fn issue_session(
        &self,
        subject: impl ToString,
        role: Role,
        email: &str,
    ) -> Result<Session, AccountError> {
        let issued = self
            .authenticator
            .issue_session_token(subject, role.as_str(), email)?;

        Ok(Session {
            access_token: issued.access_token,
            role,
            expires_at: issued.expires_at,
        })
    }

    fn password_matches(&self, password: &str, stored_hash: &str) -> Result<bool, AccountError> {
        match self.authenticator.verify_password(password, stored_hash) {
            Ok(()) => Ok(true),
            Err(AuthenticationError::InvalidCredentials) => Ok(false),
            Err(AuthenticationError::PasswordError(e)) => Err(e.into()),
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }

    async fn require_user_row(&self, id: &UserId) -> Result<User, AccountError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound(id.to_string()))
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<User, AccountError> {
        let mut user = self.require_user_row(id).await?;
        user.role = role;
        user.is_admin = role.is_admin_tier();
        self.users.update(user).await
    }
}

fn unauthorized() -> AccountError {
    AccessError::Unauthorized("Could not validate credentials".to_string()).into()
}

#[async_trait]
impl<UR, AR, VN> AccountServicePort for AccountService<UR, AR, VN>
where
    UR: UserRepository,
    AR: AdminRepository,
    VN: VerificationNotifier,
{
    async fn register(&self, command: CreateAccountCommand) -> Result<Registration, AccountError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = self
            .users
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                role: Role::User,
                is_verified: false,
                created_by: None,
            })
            .await?;

        let issued = self
            .authenticator
            .issue_verification_token(user.id, user.email.as_str())?;

        let email = VerificationEmail {
            user_id: user.id,
            username: user.username.clone(),
            recipient: user.email.clone(),
            token: issued.access_token.clone(),
            expires_at: issued.expires_at,
        };
        if let Err(e) = self.notifier.send_verification(&email).await {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                "Failed to send verification email"
            );
        }

        tracing::info!(user_id = %user.id, "User registered");

        Ok(Registration {
            user,
            verification_token: issued.access_token,
        })
    }

    async fn confirm_verification(
        &self,
        token: &str,
    ) -> Result<VerificationOutcome, AccountError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected verification token");
            AccountError::InvalidVerificationToken
        })?;

        if claims.role.is_some() {
            return Err(AccountError::InvalidVerificationToken);
        }

        let id = UserId::from_string(&claims.sub)
            .map_err(|_| AccountError::InvalidVerificationToken)?;
        let mut user = self.require_user_row(&id).await?;

        if user.is_verified {
            return Ok(VerificationOutcome::AlreadyVerified);
        }

        user.is_verified = true;
        self.users.update(user).await?;
        tracing::info!(user_id = %id, "Email verified");

        Ok(VerificationOutcome::Verified)
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError> {
        if let Some(superadmin) = &self.superadmin {
            if superadmin.matches(&command.email, &command.password) {
                tracing::info!("Superadmin logged in");
                return self.issue_session(
                    SUPERADMIN_SUBJECT,
                    Role::Superadmin,
                    superadmin.email(),
                );
            }
        }

        if let Some(admin) = self.admins.find_by_email(&command.email).await? {
            if self.password_matches(&command.password, &admin.password_hash)? {
                tracing::info!(admin_id = %admin.id, "Admin logged in");
                return self.issue_session(admin.id, Role::Admin, admin.email.as_str());
            }
        }

        if let Some(user) = self.users.find_by_email(&command.email).await? {
            if self.password_matches(&command.password, &user.password_hash)? {
                if !user.is_verified {
                    return Err(AccountError::Unverified);
                }
                tracing::info!(user_id = %user.id, "User logged in");
                return self.issue_session(user.id, Role::User, user.email.as_str());
            }
        }

        tracing::warn!("Failed login attempt");
        Err(AccountError::InvalidCredentials)
    }

    async fn authenticate(&self, token: &str) -> Result<Principal, AccountError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            unauthorized()
        })?;

        let role = claims
            .role
            .as_deref()
            .ok_or_else(unauthorized)?
            .parse::<Role>()
            .map_err(|_| unauthorized())?;

        match role {
            Role::Superadmin => Ok(Principal::Superadmin {
                email: claims.email,
            }),
            Role::Admin => {
                let id = AdminId::from_string(&claims.sub).map_err(|_| unauthorized())?;
                let admin = self
                    .admins
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(unauthorized)?;
                Ok(Principal::Admin {
                    id: admin.id,
                    email: admin.email.to_string(),
                })
            }
            Role::User => {
                let id = UserId::from_string(&claims.sub).map_err(|_| unauthorized())?;
                let user = self
                    .users
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(unauthorized)?;
                Ok(Principal::User {
                    id: user.id,
                    email: user.email.to_string(),
                    role: user.role,
                })
            }
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AccountError> {
        self.require_user_row(id).await
    }

    async fn list_users(&self, actor: &Principal) -> Result<Vec<User>, AccountError> {
        actor.require_admin()?;
        self.users.list_all().await
    }

    async fn create_user(
        &self,
        actor: &Principal,
        command: CreateAccountCommand,
    ) -> Result<User, AccountError> {
        actor.require_admin()?;
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = self
            .users
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                role: Role::User,
                is_verified: true,
                created_by: actor.admin_id(),
            })
            .await?;

        tracing::info!(user_id = %user.id, created_by = %actor, "User created by admin");
        Ok(user)
    }

    async fn update_user(
        &self,
        actor: &Principal,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, AccountError> {
        actor.require_self_or_admin(id)?;
        let mut user = self.require_user_row(id).await?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.authenticator.hash_password(&new_password)?;
        }

        self.users.update(user).await
    }

    async fn delete_user(&self, actor: &Principal, id: &UserId) -> Result<User, AccountError> {
        actor.require_self_or_admin(id)?;
        let user = self.require_user_row(id).await?;
        self.users.delete(id).await?;

        tracing::info!(user_id = %id, deleted_by = %actor, "User deleted");
        Ok(user)
    }

    async fn promote_user(&self, actor: &Principal, id: &UserId) -> Result<User, AccountError> {
        actor.require_superadmin()?;
        self.set_role(id, Role::Admin).await
    }

    async fn demote_user(&self, actor: &Principal, id: &UserId) -> Result<User, AccountError> {
        actor.require_superadmin()?;
        self.set_role(id, Role::User).await
    }

    async fn count_users(&self, actor: &Principal) -> Result<i64, AccountError> {
        actor.require_admin()?;
        self.users.count().await
    }

    async fn list_admins(&self, actor: &Principal) -> Result<Vec<Admin>, AccountError> {
        actor.require_superadmin()?;
        self.admins.list_all().await
    }

    async fn create_admin(
        &self,
        actor: &Principal,
        command: CreateAccountCommand,
    ) -> Result<Admin, AccountError> {
        actor.require_superadmin()?;
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let admin = self
            .admins
            .create(NewAdmin {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(admin_id = %admin.id, "Admin created");
        Ok(admin)
    }

    async fn delete_admin(&self, actor: &Principal, id: &AdminId) -> Result<(), AccountError> {
        actor.require_superadmin()?;
        self.admins.delete(id).await?;

        tracing::info!(admin_id = %id, "Admin deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::Argon2Hasher;
    use auth::Claims;
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::account::errors::NotifierError;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::Username;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, AccountError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;
            async fn list_all(&self) -> Result<Vec<User>, AccountError>;
            async fn update(&self, user: User) -> Result<User, AccountError>;
            async fn delete(&self, id: &UserId) -> Result<(), AccountError>;
            async fn count(&self) -> Result<i64, AccountError>;
        }
    }

    mock! {
        pub TestAdminRepository {}

        #[async_trait]
        impl AdminRepository for TestAdminRepository {
            async fn create(&self, admin: NewAdmin) -> Result<Admin, AccountError>;
            async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AccountError>;
            async fn list_all(&self) -> Result<Vec<Admin>, AccountError>;
            async fn delete(&self, id: &AdminId) -> Result<(), AccountError>;
        }
    }

    mock! {
        pub TestNotifier {}

        #[async_trait]
        impl VerificationNotifier for TestNotifier {
            async fn send_verification(&self, email: &VerificationEmail) -> Result<(), NotifierError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(
            Authenticator::new(SECRET, Duration::minutes(30), Duration::hours(1)).with_hasher(
                Argon2Hasher::with_params(8, 1, 1).expect("Failed to build hasher"),
            ),
        )
    }

    fn superadmin_credentials() -> SuperadminCredentials {
        SuperadminCredentials::new("root@example.com".to_string(), "rootpass".to_string())
    }

    fn service(
        users: MockTestUserRepository,
        admins: MockTestAdminRepository,
        notifier: MockTestNotifier,
        authenticator: Arc<Authenticator>,
    ) -> AccountService<MockTestUserRepository, MockTestAdminRepository, MockTestNotifier> {
        AccountService::new(
            Arc::new(users),
            Arc::new(admins),
            Arc::new(notifier),
            authenticator,
            Some(superadmin_credentials()),
        )
    }

    fn user(id: i64, password_hash: &str, is_verified: bool) -> User {
        User {
            id: UserId(id),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: password_hash.to_string(),
            role: Role::User,
            is_verified,
            is_admin: false,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    fn admin(id: i64, password_hash: &str) -> Admin {
        Admin {
            id: AdminId(id),
            username: Username::new("staff".to_string()).unwrap(),
            email: EmailAddress::new("staff@example.com".to_string()).unwrap(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        }
    }

    fn command(username: &str, email: &str, password: &str) -> CreateAccountCommand {
        CreateAccountCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            password.to_string(),
        )
    }

    fn login(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn superadmin() -> Principal {
        Principal::Superadmin {
            email: "root@example.com".to_string(),
        }
    }

    fn plain_user(id: i64) -> Principal {
        Principal::User {
            id: UserId(id),
            email: "alice@example.com".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_register_creates_unverified_user_and_sends_email() {
        let mut users = MockTestUserRepository::new();
        let mut notifier = MockTestNotifier::new();

        users
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.role == Role::User
                    && !user.is_verified
                    && user.created_by.is_none()
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| {
                let mut created = user(1, &new_user.password_hash, false);
                created.email = new_user.email;
                Ok(created)
            });

        notifier
            .expect_send_verification()
            .withf(|email| email.user_id == UserId(1) && email.recipient.as_str() == "alice@example.com")
            .times(1)
            .returning(|_| Ok(()));

        let authenticator = authenticator();
        let service = service(
            users,
            MockTestAdminRepository::new(),
            notifier,
            authenticator.clone(),
        );

        let registration = service
            .register(command("alice", "alice@example.com", "password123"))
            .await
            .unwrap();

        assert!(!registration.user.is_verified);
        let claims = authenticator
            .validate_token(&registration.verification_token)
            .unwrap();
        assert_eq!(claims.sub, "1");
        assert!(claims.role.is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut users = MockTestUserRepository::new();
        let mut notifier = MockTestNotifier::new();

        users.expect_create().times(1).returning(|user| {
            Err(AccountError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });
        notifier.expect_send_verification().times(0);

        let service = service(
            users,
            MockTestAdminRepository::new(),
            notifier,
            authenticator(),
        );

        let result = service
            .register(command("alice2", "alice@example.com", "password123"))
            .await;
        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_survives_notifier_failure() {
        let mut users = MockTestUserRepository::new();
        let mut notifier = MockTestNotifier::new();

        users
            .expect_create()
            .times(1)
            .returning(|new_user| Ok(user(1, &new_user.password_hash, false)));
        notifier
            .expect_send_verification()
            .times(1)
            .returning(|_| Err(NotifierError::PublishFailed("broker down".to_string())));

        let service = service(
            users,
            MockTestAdminRepository::new(),
            notifier,
            authenticator(),
        );

        let result = service
            .register(command("alice", "alice@example.com", "password123"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_confirm_verification_is_idempotent() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_verification_token(1, "alice@example.com")
            .unwrap()
            .access_token;

        let mut users = MockTestUserRepository::new();
        let mut seq = mockall::Sequence::new();
        users
            .expect_find_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(user(1, "$argon2id$hash", false))));
        users
            .expect_update()
            .withf(|user| user.is_verified)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|user| Ok(user));
        users
            .expect_find_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(user(1, "$argon2id$hash", true))));

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator,
        );

        assert_eq!(
            service.confirm_verification(&token).await.unwrap(),
            VerificationOutcome::Verified
        );
        assert_eq!(
            service.confirm_verification(&token).await.unwrap(),
            VerificationOutcome::AlreadyVerified
        );
    }

    #[tokio::test]
    async fn test_confirm_verification_rejects_session_token() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_session_token(1, "user", "alice@example.com")
            .unwrap()
            .access_token;

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(0);

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator,
        );

        assert!(matches!(
            service.confirm_verification(&token).await,
            Err(AccountError::InvalidVerificationToken)
        ));
    }

    #[tokio::test]
    async fn test_confirm_verification_rejects_expired_token() {
        let authenticator = authenticator();
        let claims = Claims::new(
            1,
            "alice@example.com",
            Utc::now() - Duration::hours(2),
            Duration::hours(1),
        );
        let token = authenticator.sign(&claims).unwrap().access_token;

        let service = service(
            MockTestUserRepository::new(),
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator,
        );

        assert!(matches!(
            service.confirm_verification(&token).await,
            Err(AccountError::InvalidVerificationToken)
        ));
    }

    #[tokio::test]
    async fn test_confirm_verification_deleted_user() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_verification_token(1, "alice@example.com")
            .unwrap()
            .access_token;

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator,
        );

        assert!(matches!(
            service.confirm_verification(&token).await,
            Err(AccountError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_login_superadmin_skips_store() {
        let mut users = MockTestUserRepository::new();
        let mut admins = MockTestAdminRepository::new();
        users.expect_find_by_email().times(0);
        admins.expect_find_by_email().times(0);

        let authenticator = authenticator();
        let service = service(users, admins, MockTestNotifier::new(), authenticator.clone());

        let session = service
            .login(login("root@example.com", "rootpass"))
            .await
            .unwrap();

        assert_eq!(session.role, Role::Superadmin);
        let claims = authenticator.validate_token(&session.access_token).unwrap();
        assert_eq!(claims.sub, "0");
        assert_eq!(claims.role.as_deref(), Some("superadmin"));
    }

    #[tokio::test]
    async fn test_login_admin() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("staffpass").unwrap();

        let mut users = MockTestUserRepository::new();
        let mut admins = MockTestAdminRepository::new();
        admins
            .expect_find_by_email()
            .withf(|email| email == "staff@example.com")
            .times(1)
            .returning(move |_| Ok(Some(admin(4, &hash))));
        users.expect_find_by_email().times(0);

        let service = service(users, admins, MockTestNotifier::new(), authenticator.clone());

        let session = service
            .login(login("staff@example.com", "staffpass"))
            .await
            .unwrap();

        assert_eq!(session.role, Role::Admin);
        let claims = authenticator.validate_token(&session.access_token).unwrap();
        assert_eq!(claims.sub, "4");
    }

    #[tokio::test]
    async fn test_login_verified_user() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("password123").unwrap();

        let mut users = MockTestUserRepository::new();
        let mut admins = MockTestAdminRepository::new();
        admins.expect_find_by_email().times(1).returning(|_| Ok(None));
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user(7, &hash, true))));

        let service = service(users, admins, MockTestNotifier::new(), authenticator.clone());

        let session = service
            .login(login("alice@example.com", "password123"))
            .await
            .unwrap();

        let claims = authenticator.validate_token(&session.access_token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role.as_deref(), Some("user"));
        assert_eq!(claims.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_unverified_user_with_correct_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("password123").unwrap();

        let mut users = MockTestUserRepository::new();
        let mut admins = MockTestAdminRepository::new();
        admins.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user(7, &hash, false))));

        let service = service(users, admins, MockTestNotifier::new(), authenticator);

        assert!(matches!(
            service.login(login("alice@example.com", "password123")).await,
            Err(AccountError::Unverified)
        ));
    }

    #[tokio::test]
    async fn test_login_unverified_user_with_wrong_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("password123").unwrap();

        let mut users = MockTestUserRepository::new();
        let mut admins = MockTestAdminRepository::new();
        admins.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user(7, &hash, false))));

        let service = service(users, admins, MockTestNotifier::new(), authenticator);

        assert!(matches!(
            service.login(login("alice@example.com", "wrong")).await,
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockTestUserRepository::new();
        let mut admins = MockTestAdminRepository::new();
        admins.expect_find_by_email().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));

        let service = service(users, admins, MockTestNotifier::new(), authenticator());

        assert!(matches!(
            service.login(login("nobody@example.com", "whatever")).await,
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_superadmin_skips_store() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_session_token(0, "superadmin", "root@example.com")
            .unwrap()
            .access_token;

        let mut users = MockTestUserRepository::new();
        let mut admins = MockTestAdminRepository::new();
        users.expect_find_by_id().times(0);
        admins.expect_find_by_id().times(0);

        let service = service(users, admins, MockTestNotifier::new(), authenticator);

        assert_eq!(service.authenticate(&token).await.unwrap(), superadmin());
    }

    #[tokio::test]
    async fn test_authenticate_admin_resolves_admin_row() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_session_token(4, "admin", "staff@example.com")
            .unwrap()
            .access_token;

        let mut users = MockTestUserRepository::new();
        let mut admins = MockTestAdminRepository::new();
        admins
            .expect_find_by_id()
            .withf(|id| *id == AdminId(4))
            .times(1)
            .returning(|_| Ok(Some(admin(4, "$argon2id$hash"))));
        users.expect_find_by_id().times(0);

        let service = service(users, admins, MockTestNotifier::new(), authenticator);

        assert_eq!(
            service.authenticate(&token).await.unwrap(),
            Principal::Admin {
                id: AdminId(4),
                email: "staff@example.com".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_authenticate_user_carries_stored_role() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_session_token(7, "user", "alice@example.com")
            .unwrap()
            .access_token;

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| {
            let mut promoted = user(7, "$argon2id$hash", true);
            promoted.role = Role::Admin;
            Ok(Some(promoted))
        });

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator,
        );

        let principal = service.authenticate(&token).await.unwrap();
        assert_eq!(principal.role(), Role::Admin);
        assert!(principal.require_admin().is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_verification_token() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_verification_token(7, "alice@example.com")
            .unwrap()
            .access_token;

        let service = service(
            MockTestUserRepository::new(),
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator,
        );

        assert!(matches!(
            service.authenticate(&token).await,
            Err(AccountError::Access(AccessError::Unauthorized(_)))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_session_token(7, "user", "alice@example.com")
            .unwrap()
            .access_token;

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator,
        );

        assert!(matches!(
            service.authenticate(&token).await,
            Err(AccountError::Access(AccessError::Unauthorized(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_user_by_admin_is_verified_and_attributed() {
        let mut users = MockTestUserRepository::new();
        users
            .expect_create()
            .withf(|user| user.is_verified && user.created_by == Some(AdminId(4)))
            .times(1)
            .returning(|new_user| {
                let mut created = user(8, &new_user.password_hash, true);
                created.created_by = new_user.created_by;
                Ok(created)
            });

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator(),
        );

        let actor = Principal::Admin {
            id: AdminId(4),
            email: "staff@example.com".to_string(),
        };
        let created = service
            .create_user(&actor, command("bob", "bob@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(created.created_by, Some(AdminId(4)));
    }

    #[tokio::test]
    async fn test_list_users_forbidden_for_plain_user() {
        let mut users = MockTestUserRepository::new();
        users.expect_list_all().times(0);

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator(),
        );

        assert!(matches!(
            service.list_users(&plain_user(1)).await,
            Err(AccountError::Access(AccessError::Forbidden(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_user_self() {
        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(user(1, "$argon2id$old", true))));
        users
            .expect_update()
            .withf(|user| {
                user.username.as_str() == "alice2" && user.password_hash.starts_with("$argon2id$v=")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator(),
        );

        let command = UpdateUserCommand {
            username: Some(Username::new("alice2".to_string()).unwrap()),
            email: None,
            password: Some("newpassword".to_string()),
        };
        let updated = service
            .update_user(&plain_user(1), &UserId(1), command)
            .await
            .unwrap();
        assert_eq!(updated.username.as_str(), "alice2");
        assert_eq!(updated.email.as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_update_other_user_forbidden() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(0);

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator(),
        );

        let result = service
            .update_user(&plain_user(1), &UserId(2), UpdateUserCommand::default())
            .await;
        assert!(matches!(
            result,
            Err(AccountError::Access(AccessError::Forbidden(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));
        users.expect_delete().times(0);

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator(),
        );

        assert!(matches!(
            service.delete_user(&superadmin(), &UserId(9)).await,
            Err(AccountError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_promote_and_demote() {
        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_id()
            .times(2)
            .returning(|_| Ok(Some(user(1, "$argon2id$hash", true))));
        users.expect_update().times(2).returning(|user| Ok(user));

        let service = service(
            users,
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator(),
        );

        let promoted = service.promote_user(&superadmin(), &UserId(1)).await.unwrap();
        assert_eq!(promoted.role, Role::Admin);
        assert!(promoted.is_admin);

        let demoted = service.demote_user(&superadmin(), &UserId(1)).await.unwrap();
        assert_eq!(demoted.role, Role::User);
        assert!(!demoted.is_admin);
    }

    #[tokio::test]
    async fn test_promote_requires_superadmin() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestAdminRepository::new(),
            MockTestNotifier::new(),
            authenticator(),
        );

        let actor = Principal::Admin {
            id: AdminId(4),
            email: "staff@example.com".to_string(),
        };
        assert!(matches!(
            service.promote_user(&actor, &UserId(1)).await,
            Err(AccountError::Access(AccessError::Forbidden(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_admin_duplicate_email() {
        let mut admins = MockTestAdminRepository::new();
        admins.expect_create().times(1).returning(|admin| {
            Err(AccountError::EmailAlreadyExists(
                admin.email.as_str().to_string(),
            ))
        });

        let service = service(
            MockTestUserRepository::new(),
            admins,
            MockTestNotifier::new(),
            authenticator(),
        );

        let result = service
            .create_admin(&superadmin(), command("staff", "staff@example.com", "staffpass"))
            .await;
        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }
}
