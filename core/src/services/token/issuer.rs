//! Access-token issuance

use std::sync::Arc;

use auth_shared::config::TokenConfig;
use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, Header};

use crate::domain::entities::token::{AccessClaims, ACCESS_TOKEN_EXPIRY_MINUTES};
use crate::domain::entities::user::User;
use crate::errors::KeyError;

use super::key_custodian::KeyCustodian;

/// Builds and signs short-lived RS256 access tokens
///
/// Tokens carry the signing key's id in the `kid` header. Verifying them is
/// left to consumers of the published key set.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    custodian: Arc<KeyCustodian>,
    access_token_ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer with the configured access-token lifetime
    pub fn new(custodian: Arc<KeyCustodian>, config: &TokenConfig) -> Self {
        Self::with_ttl(custodian, Duration::seconds(config.access_token_ttl_secs))
    }

    /// Creates an issuer with an explicit access-token lifetime
    pub fn with_ttl(custodian: Arc<KeyCustodian>, access_token_ttl: Duration) -> Self {
        Self {
            custodian,
            access_token_ttl,
        }
    }

    /// Access-token lifetime
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Signs a fresh access token for `user`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - compact JWT
    /// * `Err(KeyError::Signing)` - the active key could not sign
    pub fn sign(&self, user: &User) -> Result<String, KeyError> {
        let claims = AccessClaims::for_user(user, self.access_token_ttl);
        let key = self.custodian.current_private_key();

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(key.kid.clone());

        encode(&header, &claims, &key.encoding_key).map_err(KeyError::Signing)
    }
}

impl From<Arc<KeyCustodian>> for TokenIssuer {
    fn from(custodian: Arc<KeyCustodian>) -> Self {
        Self::with_ttl(custodian, Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES))
    }
}
