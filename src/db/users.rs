//! User repository
//!
//! One parameterized statement per endpoint, plus the email lookup that
//! backs create's pre-check. Conflict handling is asymmetric on purpose:
//! `update` classifies the store's unique violation, `insert` does not -
//! create's pre-check is the friendly path, and a lost race surfaces as a
//! plain store error.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// User row as stored.
///
/// Update writes request fields through unchecked, so non-key columns can
/// hold NULL where the schema permits it; they decode as `Option`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("user not found")]
    NotFound,

    #[error("duplicate email")]
    DuplicateEmail,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All rows, store-default order.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Single row by id.
    pub async fn get(&self, id: i32) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    /// Any row holding this email. Backs create's duplicate pre-check.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Insert a row, letting the store assign the id.
    pub async fn insert(&self, name: &str, email: &str, age: i32) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, age) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(age)
        .fetch_one(self.pool)
        .await?;
        Ok(user)
    }

    /// Overwrite all three fields for `id`. Absent fields bind as NULL.
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        email: Option<&str>,
        age: Option<i32>,
    ) -> Result<User, DbError> {
        let result = sqlx::query_as::<_, User>(
            "UPDATE users SET name = $1, email = $2, age = $3 WHERE id = $4 RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(age)
        .bind(id)
        .fetch_optional(self.pool)
        .await;

        match result {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(DbError::NotFound),
            Err(e) if is_unique_violation(&e) => Err(DbError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete by id, reporting zero rows affected as `NotFound`.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}

/// Postgres unique_violation, SQLSTATE 23505.
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
