//! Web server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};

/// Seven days.
const DEFAULT_SESSION_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: IpAddr,

    /// HTTP port (default: 5000)
    pub port: u16,

    /// sqlx connection URL (default: sqlite://kala.db)
    pub database_url: String,

    /// Signs session and flash cookies
    pub secret_key: String,

    /// Email of the account `/init` creates
    pub admin_email: String,

    /// Password of the account `/init` creates
    pub admin_password: String,

    /// How long a login lasts, in seconds
    pub session_lifetime_secs: i64,
}

impl WebConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = WebConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))?,

            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://kala.db".to_string()),

            // In production, this MUST be set via environment variable
            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| "change-me-please".to_string()),

            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@kala".to_string()),

            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "kala123".to_string()),

            session_lifetime_secs: env::var("SESSION_LIFETIME_SECS")
                .unwrap_or_else(|_| DEFAULT_SESSION_LIFETIME_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SESSION_LIFETIME_SECS".to_string()))?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.is_empty() {
            return Err(ConfigError::MissingRequired("SECRET_KEY".to_string()));
        }
        if self.session_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("SESSION_LIFETIME_SECS".to_string()));
        }
        Ok(())
    }

    /// Address the server listens on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
            database_url: "sqlite://kala.db".to_string(),
            secret_key: "change-me-please".to_string(),
            admin_email: "admin@kala".to_string(),
            admin_password: "kala123".to_string(),
            session_lifetime_secs: DEFAULT_SESSION_LIFETIME_SECS,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WebConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_rejects_empty_secret_and_bad_lifetime() {
        let config = WebConfig {
            secret_key: String::new(),
            ..WebConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingRequired(_))));

        let config = WebConfig {
            session_lifetime_secs: 0,
            ..WebConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }
}
