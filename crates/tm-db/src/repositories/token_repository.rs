//! Session token persistence.
//!
//! Tokens live in their own table so issuance is a single-row INSERT and
//! revocation a single-row DELETE. Two concurrent logins for one user insert
//! two independent rows; there is no list to read, modify, and write back,
//! and therefore no lost-update window.

use crate::error::Result as DbErrorResult;

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

pub struct TokenRepository;

impl TokenRepository {
    /// Atomic append of one issued token.
    pub async fn insert<'e, E>(
        executor: E,
        user_id: Uuid,
        token: &str,
        issued_at: DateTime<Utc>,
    ) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query("INSERT INTO user_tokens (token, user_id, issued_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id.to_string())
            .bind(issued_at.timestamp())
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Exact-match removal. Returns the number of rows deleted; 0 means the
    /// token was not present, which callers treat as a no-op.
    pub async fn delete<'e, E>(executor: E, user_id: Uuid, token: &str) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM user_tokens WHERE user_id = ? AND token = ?")
            .bind(user_id.to_string())
            .bind(token)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_all_for_user<'e, E>(executor: E, user_id: Uuid) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM user_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// A user's live tokens in issuance order.
    pub async fn list_for_user<'e, E>(executor: E, user_id: Uuid) -> DbErrorResult<Vec<String>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT token
                FROM user_tokens
                WHERE user_id = ?
                ORDER BY issued_at, rowid
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.iter()
            .map(|r| r.try_get::<String, _>("token").map_err(Into::into))
            .collect()
    }

    pub async fn exists<'e, E>(executor: E, user_id: Uuid, token: &str) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query("SELECT 1 FROM user_tokens WHERE user_id = ? AND token = ?")
            .bind(user_id.to_string())
            .bind(token)
            .fetch_optional(executor)
            .await?;

        Ok(row.is_some())
    }
}
