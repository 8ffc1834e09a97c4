use crate::{AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, PasswordConfig};

use std::path::PathBuf;

use log::warn;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub password: PasswordConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for TM_CONFIG_DIR env var, else use ./.tm/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply TM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load(). A missing signing
    /// secret is a validate-time (startup-fatal) error, not a load error.
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: TM_CONFIG_DIR env var > ./.tm/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("TM_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".tm"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("TM_AUTH_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }

        if let Ok(path) = std::env::var("TM_DATABASE_PATH") {
            self.database.path = path;
        }
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.auth.validate()?;
        self.password.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file, creating the config directory if
    /// needed.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            warn!("config directory {} missing, creating", config_dir.display());
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        Ok(config_dir.join(&self.database.path))
    }
}
