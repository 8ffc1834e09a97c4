#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tm_core::{Task, User};
use uuid::Uuid;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Creates a test User with sensible defaults. The marker keeps emails
/// unique across fixtures within one test.
pub fn create_test_user(marker: u32) -> User {
    User::new(
        format!("Test User {marker}"),
        format!("test-{marker}@example.com"),
        // Any PHC-shaped string will do; repository tests never verify it.
        "$argon2id$v=19$m=32,t=1,p=1$c2FsdHNhbHQ$uEkr1rvIjEY".to_string(),
        30,
    )
}

/// Creates a test Task owned by the given user
pub fn create_test_task(owner_id: Uuid, marker: u32) -> Task {
    Task::new(format!("Test task {marker}"), owner_id)
}
