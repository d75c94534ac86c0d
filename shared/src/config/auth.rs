//! Authentication configuration: signing keys, token lifetimes, password
//! hashing and external-store timeouts

use serde::{Deserialize, Serialize};

use super::env_or;

/// Signing key configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Path to the PEM-encoded RSA private key. When unset a key pair is
    /// generated at startup.
    pub private_key_path: Option<String>,

    /// Path to the PEM-encoded RSA public key
    pub public_key_path: Option<String>,

    /// Size of generated keys in bits
    pub generated_key_bits: usize,

    /// Whether scheduled key rotation is enabled
    pub rotation_enabled: bool,

    /// Key rotation interval in seconds
    pub rotation_interval_secs: u64,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            private_key_path: None,
            public_key_path: None,
            generated_key_bits: 2048,
            rotation_enabled: false,
            rotation_interval_secs: 600, // 10 minutes
        }
    }
}

impl KeyConfig {
    /// Creates config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH").ok(),
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH").ok(),
            generated_key_bits: env_or("JWT_GENERATED_KEY_BITS", defaults.generated_key_bits),
            rotation_enabled: env_or("JWT_ALLOW_KEY_ROTATION", defaults.rotation_enabled),
            rotation_interval_secs: env_or(
                "JWT_KEY_ROTATION_INTERVAL",
                defaults.rotation_interval_secs,
            ),
        }
    }

    /// Returns both key paths when the pair is configured
    pub fn key_paths(&self) -> Option<(&str, &str)> {
        match (&self.private_key_path, &self.public_key_path) {
            (Some(private), Some(public)) => Some((private.as_str(), public.as_str())),
            _ => None,
        }
    }
}

/// Token lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Access token lifetime in seconds
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_secs: u64,

    /// Number of times a refresh token may be redeemed
    pub refresh_max_uses: u32,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_secs: 900,              // 15 minutes
            refresh_token_ttl_secs: 30 * 24 * 3600,  // 30 days
            refresh_max_uses: 3,
        }
    }
}

impl TokenConfig {
    /// Creates config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_token_ttl_secs: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_ttl_secs),
            refresh_token_ttl_secs: env_or(
                "JWT_REFRESH_TOKEN_EXPIRY",
                defaults.refresh_token_ttl_secs,
            ),
            refresh_max_uses: env_or("REFRESH_TOKEN_MAX_USES", defaults.refresh_max_uses),
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HasherConfig {
    /// bcrypt work factor
    pub cost: u32,

    /// Maximum number of hash/verify operations running at once
    pub max_concurrent: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            cost: 10,
            max_concurrent: 4,
        }
    }
}

impl HasherConfig {
    /// Creates config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cost: env_or("BCRYPT_COST", defaults.cost),
            max_concurrent: env_or("BCRYPT_MAX_CONCURRENT", defaults.max_concurrent),
        }
    }
}

/// Session orchestration settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Upper bound for any single user-store or refresh-store call, in milliseconds
    pub store_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: 3000,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Signing key configuration
    pub keys: KeyConfig,

    /// Token lifetimes
    pub token: TokenConfig,

    /// Password hashing
    pub hasher: HasherConfig,

    /// Session orchestration
    pub session: SessionConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            keys: KeyConfig::from_env(),
            token: TokenConfig::from_env(),
            hasher: HasherConfig::from_env(),
            session: SessionConfig {
                store_timeout_ms: env_or("STORE_TIMEOUT_MS", SessionConfig::default().store_timeout_ms),
            },
        }
    }
}
