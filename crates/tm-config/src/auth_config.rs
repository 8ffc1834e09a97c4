use crate::{ConfigErrorResult, MIN_JWT_SECRET_BYTES, error::ConfigError};

use serde::Deserialize;

/// Token-signing configuration.
///
/// The secret is process-wide, loaded once at startup and never rotated at
/// runtime; components receive it by injection, never by reading the
/// environment themselves.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::auth(
                "auth.jwt_secret is required (set TM_AUTH_JWT_SECRET or config.toml [auth])",
            ));
        }

        if self.jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {} characters, got {}",
                MIN_JWT_SECRET_BYTES,
                self.jwt_secret.len()
            )));
        }

        Ok(())
    }

    /// Secret bytes for the token signer.
    pub fn secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}
