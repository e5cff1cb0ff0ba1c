use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AdminId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewUser;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::Username;
use crate::domain::account::ports::UserRepository;
use crate::domain::account::principal::Role;
use crate::outbound::repositories::violation;
use crate::outbound::repositories::Violation;

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    is_verified: bool,
    is_admin: bool,
    admin_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AccountError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(r.id),
            username: Username::new(r.username)?,
            email: EmailAddress::new(r.email)?,
            password_hash: r.password_hash,
            role: r
                .role
                .parse::<Role>()
                .map_err(|e| AccountError::DatabaseError(e.to_string()))?,
            is_verified: r.is_verified,
            is_admin: r.is_admin,
            created_by: r.admin_id.map(AdminId),
            created_at: r.created_at,
        })
    }
}

/// Translate a write failure, naming the offending value for unique violations.
fn write_error(e: sqlx::Error, username: &Username, email: &EmailAddress) -> AccountError {
    match violation(&e) {
        Some(Violation::Unique("users_username_key")) => {
            AccountError::UsernameAlreadyExists(username.as_str().to_string())
        }
        Some(Violation::Unique("users_email_key")) => {
            AccountError::EmailAlreadyExists(email.as_str().to_string())
        }
        _ => AccountError::DatabaseError(e.to_string()),
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash, role, is_verified, is_admin, admin_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, password_hash, role, is_verified, is_admin, admin_id, created_at
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_verified)
        .bind(user.role.is_admin_tier())
        .bind(user.created_by.map(|id| id.0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.username, &user.email))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, role, is_verified, is_admin, admin_id, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, role, is_verified, is_admin, admin_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, AccountError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, role, is_verified, is_admin, admin_id, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: User) -> Result<User, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, role = $5, is_verified = $6, is_admin = $7
            WHERE id = $1
            RETURNING id, username, email, password_hash, role, is_verified, is_admin, admin_id, created_at
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_verified)
        .bind(user.is_admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.username, &user.email))?;

        match row {
            Some(r) => r.try_into(),
            None => Err(AccountError::UserNotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound(id.to_string()));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AccountError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }
}
