//! Access/refresh token pair returned after registration or login.

use serde::{Deserialize, Serialize};

/// Token pair minted for an authenticated user
///
/// Contains:
/// - a signed RS256 access token
/// - an opaque refresh token recorded in the refresh store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed access token for API authentication
    pub access_token: String,

    /// Opaque refresh token for obtaining new access tokens
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
