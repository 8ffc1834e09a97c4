use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// JWT claims carried by a session token.
///
/// Tokens never expire in this design (revocation is the only way out), so
/// there is no `exp` claim; `iat` is kept for auditability. The `jti` makes
/// every issued token distinct even when one user logs in twice within the
/// same second, which the token store's primary key relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Token id, unique per issuance
    pub jti: String,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub",
                message: "sub (user id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
