use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Admin;
use crate::domain::account::models::AdminId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAdmin;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AdminRepository;
use crate::outbound::repositories::violation;
use crate::outbound::repositories::Violation;

#[derive(Debug, FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = AccountError;

    fn try_from(r: AdminRow) -> Result<Self, Self::Error> {
        Ok(Admin {
            id: AdminId(r.id),
            username: Username::new(r.username)?,
            email: EmailAddress::new(r.email)?,
            password_hash: r.password_hash,
            created_at: r.created_at,
        })
    }
}

pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn create(&self, admin: NewAdmin) -> Result<Admin, AccountError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            INSERT INTO admins (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(admin.username.as_str())
        .bind(admin.email.as_str())
        .bind(&admin.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::Unique("admins_username_key")) => {
                AccountError::UsernameAlreadyExists(admin.username.as_str().to_string())
            }
            Some(Violation::Unique("admins_email_key")) => {
                AccountError::EmailAlreadyExists(admin.email.as_str().to_string())
            }
            _ => AccountError::DatabaseError(e.to_string()),
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, AccountError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Admin::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AccountError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Admin::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Admin>, AccountError> {
        let rows = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM admins
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Admin::try_from).collect()
    }

    async fn delete(&self, id: &AdminId) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::AdminNotFound(id.to_string()));
        }

        Ok(())
    }
}
