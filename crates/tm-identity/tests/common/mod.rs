#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tm_auth::{CredentialHasher, TokenSigner};
use tm_identity::{IdentityService, NewUser};

pub const TEST_SECRET: &[u8] = b"integration-test-secret-32-bytes!";

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

    sqlx::migrate!("../tm-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Service over the given pool with fast (test-grade) hashing costs
pub fn create_test_service(pool: SqlitePool) -> IdentityService {
    let signer = TokenSigner::new(TEST_SECRET);
    let hasher = CredentialHasher::new(32, 1, 1).expect("valid test costs");

    IdentityService::new(pool, signer, hasher)
}

/// Registration input with sensible defaults and a unique email per marker
pub fn registration(marker: u32) -> NewUser {
    NewUser {
        name: format!("Test User {marker}"),
        email: format!("test-{marker}@example.com"),
        password: "correct-horse".to_string(),
        age: 30,
    }
}
