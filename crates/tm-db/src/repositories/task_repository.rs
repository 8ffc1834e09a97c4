use crate::{DbError, error::Result as DbErrorResult};

use tm_core::Task;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub struct TaskRepository;

impl TaskRepository {
    pub async fn create<'e, E>(executor: E, task: &Task) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO tasks (id, description, completed, owner_id, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.id.to_string())
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.owner_id.to_string())
        .bind(task.created_at.timestamp())
        .bind(task.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, description, completed, owner_id, created_at, updated_at
                FROM tasks
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(|r| decode_task(&r)).transpose()
    }

    pub async fn find_by_owner<'e, E>(executor: E, owner_id: Uuid) -> DbErrorResult<Vec<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT id, description, completed, owner_id, created_at, updated_at
                FROM tasks
                WHERE owner_id = ?
                ORDER BY created_at, rowid
            "#,
        )
        .bind(owner_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.iter().map(decode_task).collect()
    }

    pub async fn count_by_owner<'e, E>(executor: E, owner_id: Uuid) -> DbErrorResult<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query("SELECT COUNT(*) AS c FROM tasks WHERE owner_id = ?")
            .bind(owner_id.to_string())
            .fetch_one(executor)
            .await?;

        row.try_get("c").map_err(Into::into)
    }

    /// Remove every task owned by `owner_id`. The cascade step of account
    /// deletion; runs inside the caller's transaction.
    pub async fn delete_all_by_owner<'e, E>(executor: E, owner_id: Uuid) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM tasks WHERE owner_id = ?")
            .bind(owner_id.to_string())
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

fn decode_task(r: &SqliteRow) -> DbErrorResult<Task> {
    let id: String = r.try_get("id")?;
    let owner_id: String = r.try_get("owner_id")?;
    let created_at: i64 = r.try_get("created_at")?;
    let updated_at: i64 = r.try_get("updated_at")?;

    Ok(Task {
        id: Uuid::parse_str(&id).map_err(|e| DbError::RowDecode {
            message: format!("Invalid UUID in tasks.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        description: r.try_get("description")?,
        completed: r.try_get("completed")?,
        owner_id: Uuid::parse_str(&owner_id).map_err(|e| DbError::RowDecode {
            message: format!("Invalid UUID in tasks.owner_id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::RowDecode {
            message: "Invalid timestamp in tasks.created_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| DbError::RowDecode {
            message: "Invalid timestamp in tasks.updated_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}
