//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{MySql, MySqlPool, Row};
use uuid::Uuid;

use auth_core::domain::entities::user::User;
use auth_core::errors::StoreError;
use auth_core::repositories::UserRepository;

const SELECT_USER: &str = "SELECT id, name, email, password, created_at FROM users";

/// MySQL implementation of UserRepository
///
/// Expects `users(id, name, email, password, created_at)` with unique
/// indexes on `name` and `email`.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, StoreError> {
        let id: String = row.try_get("id").map_err(StoreError::backend)?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| StoreError::malformed(format!("Invalid UUID: {}", e)))?,
            name: row.try_get("name").map_err(StoreError::backend)?,
            email: row.try_get("email").map_err(StoreError::backend)?,
            password_hash: row.try_get("password").map_err(StoreError::backend)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(StoreError::backend)?,
        })
    }

    async fn fetch_user(
        &self,
        query: Query<'_, MySql, MySqlArguments>,
    ) -> Result<Option<User>, StoreError> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

/// Column named by a MySQL duplicate-entry message
/// (`Duplicate entry 'x' for key 'users.email'`)
pub(crate) fn duplicate_field(message: &str) -> &'static str {
    let key = message.rsplit("for key").next().unwrap_or_default();
    if key.contains("email") {
        "email"
    } else if key.contains("name") {
        "name"
    } else {
        "id"
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO users (id, name, email, password, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate {
                    field: duplicate_field(db.message()).to_string(),
                },
                _ => StoreError::backend(e),
            })?;

        tracing::debug!(user_id = %user.id, "User row inserted");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_USER);
        self.fetch_user(sqlx::query(&query).bind(id.to_string()))
            .await
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        let query = format!("{} WHERE name = ? OR email = ? LIMIT 1", SELECT_USER);
        self.fetch_user(sqlx::query(&query).bind(identifier).bind(identifier))
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(result.rows_affected() > 0)
    }
}
