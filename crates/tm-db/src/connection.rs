use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;
use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tm_core::ErrorLocation;

/// Open (creating if missing) the SQLite database at `path` and run
/// migrations. Foreign keys are enabled on every pooled connection.
pub async fn connect(path: &Path) -> DbErrorResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Apply the embedded migrations to an existing pool.
pub async fn run_migrations(pool: &SqlitePool) -> DbErrorResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Migration {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}
