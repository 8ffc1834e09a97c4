use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task owned by a user account.
///
/// The identity core treats tasks as owned resources: it never edits their
/// content, but deleting an account must delete every task whose `owner_id`
/// matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    pub completed: bool,
    pub owner_id: Uuid,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(description: String, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            description,
            completed: false,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}
