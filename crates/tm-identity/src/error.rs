use tm_auth::AuthError;
use tm_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Validation error on {field}: {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Email address is already registered {location}")]
    DuplicateEmail { location: ErrorLocation },

    /// Deliberately carries no location and no detail: unknown email and
    /// wrong password must render identically to callers.
    #[error("Unable to login")]
    AuthenticationFailed,

    #[error("Invalid token: {source} {location}")]
    InvalidToken {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("User not found {location}")]
    UserNotFound { location: ErrorLocation },

    #[error("Persistence failed: {source} {location}")]
    Persistence {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IdentityError {
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        IdentityError::Validation {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn user_not_found() -> Self {
        IdentityError::UserNotFound {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        IdentityError::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for IdentityError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        if source.is_duplicate_email() {
            Self::DuplicateEmail {
                location: ErrorLocation::from(Location::caller()),
            }
        } else {
            Self::Persistence {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        }
    }
}

impl From<AuthError> for IdentityError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        match source {
            // Hashing and signing failures are operational, not bad input.
            AuthError::Hash { .. } | AuthError::JwtEncode { .. } => Self::Internal {
                message: source.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            source => Self::InvalidToken {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
