use crate::{DbError, error::Result as DbErrorResult};

use tm_core::User;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub async fn create<'e, E>(executor: E, user: &User) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO users (id, name, email, password_hash, age, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.age)
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<User>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, password_hash, age, created_at, updated_at
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(|r| decode_user(&r)).transpose()
    }

    /// Secondary lookup on the unique email column. Callers pass the
    /// normalized (trimmed, lowercased) form.
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> DbErrorResult<Option<User>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, password_hash, age, created_at, updated_at
                FROM users
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        row.map(|r| decode_user(&r)).transpose()
    }

    /// Write back every mutable column. Returns the number of rows updated
    /// (0 when the id does not exist).
    pub async fn update<'e, E>(executor: E, user: &User) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET name = ?, email = ?, password_hash = ?, age = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.age)
        .bind(user.updated_at.timestamp())
        .bind(user.id.to_string())
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(executor: E, id: Uuid) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

fn decode_user(r: &SqliteRow) -> DbErrorResult<User> {
    let id: String = r.try_get("id")?;
    let created_at: i64 = r.try_get("created_at")?;
    let updated_at: i64 = r.try_get("updated_at")?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DbError::RowDecode {
            message: format!("Invalid UUID in users.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        name: r.try_get("name")?,
        email: r.try_get("email")?,
        password_hash: r.try_get("password_hash")?,
        age: r.try_get("age")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::RowDecode {
            message: "Invalid timestamp in users.created_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| DbError::RowDecode {
            message: "Invalid timestamp in users.updated_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}
