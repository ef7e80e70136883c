//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build, or shorter than
    /// the minimum length, or if JWT_EXPIRATION_HOURS is out of range.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let config = Self::new(jwt_secret)?
            .with_database_url(
                env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            )
            .with_jwt_expiration_hours(
                env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            )?
            .with_server(
                env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                env::var("SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
            );

        Ok(config)
    }

    /// Create a configuration with defaults around the given signing secret.
    pub fn new(jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        })
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Set the token lifetime; must lie in `1..=MAX_JWT_EXPIRATION_HOURS`.
    pub fn with_jwt_expiration_hours(mut self, hours: i64) -> AppResult<Self> {
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&hours) {
            return Err(AppError::internal(format!(
                "JWT_EXPIRATION_HOURS must be between 1 and {}, got {}",
                MAX_JWT_EXPIRATION_HOURS, hours
            )));
        }
        self.jwt_expiration_hours = hours;
        Ok(self)
    }

    /// Token lifetime in hours.
    pub fn jwt_expiration_hours(&self) -> i64 {
        self.jwt_expiration_hours
    }

    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.server_host = host.into();
        self.server_port = port;
        self
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("too-short");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = Config::new("a-test-secret-that-is-long-enough!!").unwrap();
        assert_eq!(config.jwt_expiration_hours(), 3);
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_expiration_hours_bounds() {
        let config = Config::new("a-test-secret-that-is-long-enough!!").unwrap();

        for hours in [0, -1, MAX_JWT_EXPIRATION_HOURS + 1, 10_000_000_000, i64::MAX] {
            assert!(matches!(
                config.clone().with_jwt_expiration_hours(hours),
                Err(AppError::Internal(_))
            ));
        }

        let longest = config
            .with_jwt_expiration_hours(MAX_JWT_EXPIRATION_HOURS)
            .unwrap();
        assert_eq!(longest.jwt_expiration_hours(), MAX_JWT_EXPIRATION_HOURS);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::new("a-test-secret-that-is-long-enough!!")
            .unwrap()
            .with_database_url("postgres://user:hunter2@db/accounts");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("a-test-secret"));
    }
}
