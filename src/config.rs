//! Configuration management for taskhub.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8080`.
//! - `SEED_DATA` - Optional. When `true`, three sample tasks are inserted at
//!   startup. Defaults to `false`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Whether to insert sample tasks at startup
    pub seed_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` is set but does not
    /// parse as a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let seed_data = std::env::var("SEED_DATA")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            seed_data,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            seed_data: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(!config.seed_data);
    }

    // Single test for all env-var handling; std::env is process-global.
    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("PORT", "9191");
        std::env::set_var("SEED_DATA", "true");

        let config = Config::from_env().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9191);
        assert!(config.seed_data);

        std::env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue(_, _))
        ));

        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("SEED_DATA");
    }
}
