use tm_core::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated: {constraint} {location}")]
    UniqueViolation {
        constraint: String,
        location: ErrorLocation,
    },

    #[error("Row decode failed: {message} {location}")]
    RowDecode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    /// True when the error is the email uniqueness index rejecting a write.
    pub fn is_duplicate_email(&self) -> bool {
        matches!(self, DbError::UniqueViolation { constraint, .. } if constraint.contains("users.email"))
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::UniqueViolation {
                    constraint: db_err.message().to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            source => Self::Sqlx {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
