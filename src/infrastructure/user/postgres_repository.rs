//! PostgreSQL user record repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{UserId, UserRecord, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`UserRepository`].
///
/// Relies on a unique index over `email`; the column always holds the
/// normalized (lowercase) address.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the backing table and unique email index if missing
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS birthday_records (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                date_of_birth DATE NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create schema: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, record: UserRecord) -> Result<UserRecord, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO birthday_records (id, username, email, date_of_birth, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.username())
        .bind(record.email())
        .bind(record.date_of_birth())
        .bind(record.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Email '{}' is already registered",
                    record.email()
                ))
            } else {
                DomainError::storage(format!("Failed to insert record: {}", e))
            }
        })?;

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, date_of_birth, created_at
            FROM birthday_records
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find record by email: {}", e)))?;

        Ok(row.map(|row| row_to_record(&row)))
    }

    async fn find_all(&self) -> Result<Vec<UserRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, date_of_birth, created_at
            FROM birthday_records
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list records: {}", e)))?;

        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM birthday_records")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count records: {}", e)))?;

        Ok(count as usize)
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM birthday_records WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete record: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> UserRecord {
    let id: uuid::Uuid = row.get("id");
    let username: String = row.get("username");
    let email: String = row.get("email");
    let date_of_birth: chrono::NaiveDate = row.get("date_of_birth");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    UserRecord::from_parts(
        UserId::from_uuid(id),
        username,
        email,
        date_of_birth,
        created_at,
    )
}
