use crate::{IdentityError, Result as IdentityErrorResult};

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 7;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// Validates user attributes before they reach the persistence layer.
///
/// The database's unique index on email stays authoritative for races
/// between concurrent registrations; this validator only rejects what can be
/// rejected locally.
pub struct UserValidator;

impl UserValidator {
    /// Canonical form of an email address: trimmed and lowercased. Always
    /// applied before validation, storage, or lookup.
    pub fn normalize_email(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    #[track_caller]
    pub fn validate_name(name: &str) -> IdentityErrorResult<()> {
        if name.trim().is_empty() {
            return Err(IdentityError::validation("name", "name cannot be empty"));
        }

        Ok(())
    }

    /// Expects the normalized form.
    #[track_caller]
    pub fn validate_email(email: &str) -> IdentityErrorResult<()> {
        if !EMAIL_RE.is_match(email) {
            return Err(IdentityError::validation(
                "email",
                "email address is invalid",
            ));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_password(password: &str) -> IdentityErrorResult<()> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::validation(
                "password",
                format!("password must be at least {} characters", MIN_PASSWORD_LENGTH),
            ));
        }

        // Kept bug-for-bug with the legacy policy: the literal substring is
        // rejected case-insensitively, nothing stronger.
        if password.to_lowercase().contains("password") {
            return Err(IdentityError::validation(
                "password",
                "password cannot contain 'password'",
            ));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_age(age: i64) -> IdentityErrorResult<()> {
        if age < 0 {
            return Err(IdentityError::validation(
                "age",
                "age has to be a positive number",
            ));
        }

        Ok(())
    }

    /// Validate a full registration. `name` and `email` are expected
    /// pre-normalized (trimmed; email lowercased).
    #[track_caller]
    pub fn validate_registration(
        name: &str,
        email: &str,
        password: &str,
        age: i64,
    ) -> IdentityErrorResult<()> {
        Self::validate_name(name)?;
        Self::validate_email(email)?;
        Self::validate_password(password)?;
        Self::validate_age(age)?;

        Ok(())
    }
}
