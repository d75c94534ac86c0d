//! Issue, redeem and revoke refresh tokens against a [`RefreshStore`]

use std::sync::Arc;
use std::time::Duration;

use auth_shared::config::TokenConfig;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{
    refresh_key, REFRESH_FIELD_RATE, REFRESH_FIELD_USER, REFRESH_TOKEN_MAX_USES,
};
use crate::errors::{LedgerError, StoreError};
use crate::repositories::refresh::{DecrementOutcome, RefreshFields, RefreshStore};

/// Bookkeeping for refresh tokens
///
/// A token can be redeemed at most `max_uses` times within its lifetime.
/// Redemption relies on the store's atomic check-and-decrement, so
/// concurrent redeemers of one token never exceed that bound.
pub struct RefreshTokenLedger<S: RefreshStore> {
    store: Arc<S>,
    max_uses: u32,
}

impl<S: RefreshStore> Clone for RefreshTokenLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            max_uses: self.max_uses,
        }
    }
}

impl<S: RefreshStore> RefreshTokenLedger<S> {
    /// Create a ledger with the configured use limit
    pub fn new(store: Arc<S>, config: &TokenConfig) -> Self {
        Self::with_max_uses(store, config.refresh_max_uses)
    }

    /// Create a ledger with an explicit use limit
    pub fn with_max_uses(store: Arc<S>, max_uses: u32) -> Self {
        Self { store, max_uses }
    }

    /// Create a ledger with the default use limit of three
    pub fn with_default_limit(store: Arc<S>) -> Self {
        Self::with_max_uses(store, REFRESH_TOKEN_MAX_USES)
    }

    /// Number of redemptions a fresh token allows
    pub fn max_uses(&self) -> u32 {
        self.max_uses
    }

    /// Mint a refresh token for `user_id` that lives for `ttl`
    pub async fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, LedgerError> {
        let token = Uuid::new_v4().to_string();
        let fields = [
            (REFRESH_FIELD_USER, user_id.to_string()),
            (REFRESH_FIELD_RATE, self.max_uses.to_string()),
        ];

        self.store
            .set_with_ttl(&refresh_key(&token), &fields, ttl)
            .await?;

        debug!(user_id = %user_id, ttl_secs = ttl.as_secs(), "Refresh token issued");
        Ok(token)
    }

    /// Spend one use of `token` and return the user it belongs to
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - the owning user; one use was consumed
    /// * `Err(LedgerError::ExpiredOrUnknown)` - no live record for the token
    /// * `Err(LedgerError::RateExceeded)` - the token has no uses left
    /// * `Err(LedgerError::Store)` - the store failed or holds a malformed record
    pub async fn redeem(&self, token: &str) -> Result<Uuid, LedgerError> {
        let key = refresh_key(token);

        let fields = self
            .store
            .get(&key)
            .await?
            .ok_or(LedgerError::ExpiredOrUnknown)?;
        let user_id = owner_of(&fields)?;

        match self
            .store
            .decrement_if_positive(&key, REFRESH_FIELD_RATE)
            .await?
        {
            DecrementOutcome::Decremented(remaining) => {
                debug!(user_id = %user_id, remaining, "Refresh token redeemed");
                Ok(user_id)
            }
            DecrementOutcome::Exhausted => Err(LedgerError::RateExceeded),
            DecrementOutcome::Missing => Err(LedgerError::ExpiredOrUnknown),
        }
    }

    /// User a live `token` was issued to; `None` when it is unknown or expired
    pub async fn owner(&self, token: &str) -> Result<Option<Uuid>, LedgerError> {
        match self.store.get(&refresh_key(token)).await? {
            Some(fields) => Ok(Some(owner_of(&fields)?)),
            None => Ok(None),
        }
    }

    /// Remaining uses of `token`; `None` when it is unknown or expired
    ///
    /// This is a read-only peek and may be stale by the time it returns.
    pub async fn rate_remaining(&self, token: &str) -> Result<Option<u32>, LedgerError> {
        let Some(fields) = self.store.get(&refresh_key(token)).await? else {
            return Ok(None);
        };
        let rate = fields
            .get(REFRESH_FIELD_RATE)
            .and_then(|raw| raw.parse::<u32>().ok())
            .ok_or_else(|| StoreError::malformed(format!("{} is not a count", REFRESH_FIELD_RATE)))?;
        Ok(Some(rate))
    }

    /// Delete `token`; returns whether a live record existed
    pub async fn revoke(&self, token: &str) -> Result<bool, LedgerError> {
        let existed = self.store.delete(&refresh_key(token)).await?;
        if existed {
            debug!("Refresh token revoked");
        }
        Ok(existed)
    }
}

fn owner_of(fields: &RefreshFields) -> Result<Uuid, StoreError> {
    fields
        .get(REFRESH_FIELD_USER)
        .ok_or_else(|| StoreError::malformed(format!("{} missing", REFRESH_FIELD_USER)))
        .and_then(|raw| Uuid::parse_str(raw).map_err(|e| StoreError::malformed(e.to_string())))
}
