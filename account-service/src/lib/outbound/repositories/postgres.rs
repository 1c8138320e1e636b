use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::models::Scope;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::UserProps;
use crate::account::ports::UserRepository;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, status, scope, date_register, date_modify";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    status: String,
    scope: String,
    date_register: DateTime<Utc>,
    date_modify: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = AccountError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::rehydrate(UserProps {
            id: UserId::new(row.id),
            name: row.name,
            email: EmailAddress::new(row.email),
            password_hash: row.password_hash,
            status: row.status.parse()?,
            scope: Scope::new(row.scope),
            date_register: row.date_register,
            date_modify: row.date_modify,
        }))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let email = user.email().normalized();

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, status, scope, date_register, date_modify)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(email.as_str())
        .bind(user.password_hash())
        .bind(user.status().as_str())
        .bind(user.scope().as_str())
        .bind(user.date_register())
        .bind(user.date_modify())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_pkey") {
                        return AccountError::Conflict(user.id().to_string());
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return AccountError::EmailAlreadyExists(email.to_string());
                    }
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.normalized().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}
