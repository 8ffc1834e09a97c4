mod auth_config;
mod config;
mod database_config;
mod error;
mod password_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use password_config::PasswordConfig;

const DEFAULT_DATABASE_FILENAME: &str = "data.db";

/// HS256 secrets shorter than this are rejected at startup.
const MIN_JWT_SECRET_BYTES: usize = 32;

// Argon2 cost defaults; roughly tens of milliseconds per hash, in the same
// interactive-login ballpark as bcrypt cost 8.
const DEFAULT_M_COST_KIB: u32 = 19_456;
const DEFAULT_T_COST: u32 = 2;
const DEFAULT_P_COST: u32 = 1;

#[cfg(test)]
mod tests;
