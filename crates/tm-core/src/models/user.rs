use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User account aggregate.
///
/// # Invariants
/// - `email` is stored trimmed and lowercased; uniqueness is enforced by the
///   database index, not by this struct.
/// - `password_hash` is a PHC string produced by the credential hasher. The
///   struct is deliberately not `Serialize`: the only outward representation
///   is [`UserDto`](crate::UserDto), which has no hash field at all.
/// - Session tokens live in their own table and are never held here.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i64,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, age: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            age,
            created_at: now,
            updated_at: now,
        }
    }
}
