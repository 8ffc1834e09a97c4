use crate::User;

use serde::{Deserialize, Serialize};

/// User DTO for JSON serialization.
///
/// This is the only externally visible shape of a user account. It carries no
/// `password_hash` and no token fields, so neither can leak through an API
/// response regardless of how the caller serializes it.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name,
            email: u.email,
            age: u.age,
            created_at: u.created_at.timestamp(),
            updated_at: u.updated_at.timestamp(),
        }
    }
}
