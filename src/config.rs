//! Core configuration module.
//!
//! Consolidates the environment variable reads for the authentication core:
//! the signing secret, token and session lifetimes, and password-hashing
//! work factors.

use crate::auth::HasherConfig;
use std::env;

/// Default reset-token validity window in seconds (30 minutes).
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 1800;

/// Default browser-session lifetime in seconds (12 hours).
pub const DEFAULT_SESSION_SECS: i64 = 12 * 60 * 60;

/// Default "remember me" session lifetime in seconds (30 days).
pub const DEFAULT_REMEMBER_SECS: i64 = 30 * 24 * 60 * 60;

/// Configuration for the authentication core
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Signing secret for session and reset tokens (required, process-wide)
    pub secret_key: String,

    /// Reset-token validity window in seconds
    pub token_expiry_secs: i64,

    /// Session lifetime in seconds when "remember me" is off
    pub session_secs: i64,

    /// Session lifetime in seconds when "remember me" is on
    pub session_remember_secs: i64,

    /// Password-hashing work factors
    pub hasher: HasherConfig,
}

impl CoreConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `SECRET_KEY`: Token signing secret (required)
    /// - `TOKEN_EXPIRY_SECS`: Reset-token window in seconds (default: 1800)
    /// - `SESSION_SECS`: Short session lifetime in seconds (default: 43200)
    /// - `SESSION_REMEMBER_SECS`: Long session lifetime in seconds (default: 2592000)
    ///
    /// # Panics
    ///
    /// Panics if `SECRET_KEY` is not set or a numeric variable fails to parse
    pub fn from_env() -> Self {
        Self {
            secret_key: env::var("SECRET_KEY").expect("SECRET_KEY must be set"),
            token_expiry_secs: env::var("TOKEN_EXPIRY_SECS")
                .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_SECS.to_string())
                .parse()
                .expect("TOKEN_EXPIRY_SECS must be a valid i64"),
            session_secs: env::var("SESSION_SECS")
                .unwrap_or_else(|_| DEFAULT_SESSION_SECS.to_string())
                .parse()
                .expect("SESSION_SECS must be a valid i64"),
            session_remember_secs: env::var("SESSION_REMEMBER_SECS")
                .unwrap_or_else(|_| DEFAULT_REMEMBER_SECS.to_string())
                .parse()
                .expect("SESSION_REMEMBER_SECS must be a valid i64"),
            hasher: HasherConfig::default(),
        }
    }

    /// Create a default configuration for development
    ///
    /// Uses a fixed signing secret; never deploy this configuration.
    pub fn development() -> Self {
        Self {
            secret_key: "dev-only-secret".to_string(),
            token_expiry_secs: DEFAULT_TOKEN_EXPIRY_SECS,
            session_secs: DEFAULT_SESSION_SECS,
            session_remember_secs: DEFAULT_REMEMBER_SECS,
            hasher: HasherConfig::default(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe {
            std::env::set_var("SECRET_KEY", "test-secret");
            std::env::remove_var("TOKEN_EXPIRY_SECS");
            std::env::remove_var("SESSION_SECS");
            std::env::remove_var("SESSION_REMEMBER_SECS");
        }

        let config = CoreConfig::from_env();
        assert_eq!(config.secret_key, "test-secret");
        assert_eq!(config.token_expiry_secs, DEFAULT_TOKEN_EXPIRY_SECS);
        assert_eq!(config.session_secs, DEFAULT_SESSION_SECS);
        assert_eq!(config.session_remember_secs, DEFAULT_REMEMBER_SECS);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        unsafe {
            std::env::set_var("SECRET_KEY", "test-secret");
            std::env::set_var("TOKEN_EXPIRY_SECS", "600");
            std::env::set_var("SESSION_SECS", "3600");
            std::env::set_var("SESSION_REMEMBER_SECS", "86400");
        }

        let config = CoreConfig::from_env();
        assert_eq!(config.token_expiry_secs, 600);
        assert_eq!(config.session_secs, 3600);
        assert_eq!(config.session_remember_secs, 86400);

        unsafe {
            std::env::remove_var("TOKEN_EXPIRY_SECS");
            std::env::remove_var("SESSION_SECS");
            std::env::remove_var("SESSION_REMEMBER_SECS");
        }
    }
}
