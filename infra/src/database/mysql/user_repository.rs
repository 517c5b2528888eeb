//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use roost_core::domain::entities::user::User;
use roost_core::errors::DomainError;
use roost_core::repositories::UserRepository;

const USER_COLUMNS: &str = "id, email, username, image_url, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Persistence {
                message: format!("Invalid UUID in column id: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            username: row
                .try_get("username")
                .map_err(|e| column_error("username", e))?,
            image_url: row
                .try_get("image_url")
                .map_err(|e| column_error("image_url", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to find user by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to find user by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            "INSERT INTO users ({}) VALUES (?, ?, ?, ?, ?, ?)",
            USER_COLUMNS
        );

        sqlx::query(&query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.image_url)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                // The unique index on email turns concurrent first
                // sign-ins into a validation error, not a 500
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    DomainError::Validation {
                        message: "Email is already registered".to_string(),
                    }
                }
                _ => DomainError::Persistence {
                    message: format!("Failed to insert user: {}", e),
                },
            })?;

        Ok(user)
    }
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Persistence {
        message: format!("Failed to read column {}: {}", column, e),
    }
}
