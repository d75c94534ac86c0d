//! Configuration for the session service

use std::time::Duration;

use auth_shared::config::AuthConfig;

use crate::domain::entities::token::REFRESH_TOKEN_EXPIRY_DAYS;

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// Lifetime of newly issued refresh tokens
    pub refresh_token_ttl: Duration,
    /// Upper bound for a single user-store or refresh-store call
    pub store_timeout: Duration,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            refresh_token_ttl: Duration::from_secs(REFRESH_TOKEN_EXPIRY_DAYS as u64 * 24 * 3600),
            store_timeout: Duration::from_secs(3),
        }
    }
}

impl From<&AuthConfig> for SessionServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            refresh_token_ttl: Duration::from_secs(config.token.refresh_token_ttl_secs),
            store_timeout: Duration::from_millis(config.session.store_timeout_ms),
        }
    }
}
