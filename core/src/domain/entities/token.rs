//! Token entities for access tokens and refresh-token records.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (30 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Number of redemptions a refresh token allows
pub const REFRESH_TOKEN_MAX_USES: u32 = 3;

/// Prefix of refresh-token keys in the refresh store
pub const REFRESH_KEY_PREFIX: &str = "refresh:";

/// Refresh record field holding the owning user id
pub const REFRESH_FIELD_USER: &str = "user_info";

/// Refresh record field holding the remaining uses
pub const REFRESH_FIELD_RATE: &str = "refresh_rate";

/// Store key for a refresh token
pub fn refresh_key(token: &str) -> String {
    format!("{}{}", REFRESH_KEY_PREFIX, token)
}

/// Claims carried by a signed access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// User email
    pub email: String,
}

impl AccessClaims {
    /// Builds claims for `user` valid for `ttl` from now
    pub fn for_user(user: &User, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            email: user.email.clone(),
        }
    }

    /// Checks if the claims are past their expiry
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Parses the subject as a user id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
