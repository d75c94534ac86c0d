//! Redis-backed [`RefreshStore`]
//!
//! Each refresh record is a Redis hash whose TTL is set when it is written
//! and never extended.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use auth_core::errors::StoreError;
use auth_core::repositories::{DecrementOutcome, RefreshFields, RefreshStore};

use super::redis_client::{
    RedisClient, DECREMENT_EXHAUSTED, DECREMENT_MALFORMED, DECREMENT_MISSING,
};

/// Refresh-token store on Redis hashes
#[derive(Clone)]
pub struct RedisRefreshStore {
    client: RedisClient,
}

impl RedisRefreshStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }
}

#[async_trait]
impl RefreshStore for RedisRefreshStore {
    async fn set_with_ttl(
        &self,
        key: &str,
        fields: &[(&str, String)],
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let fields: Vec<(String, String)> = fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        // EXPIRE 0 would delete the key immediately
        let ttl_secs = ttl.as_secs().max(1);

        self.client
            .hset_with_expiry(&self.key(key), &fields, ttl_secs)
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<RefreshFields>, StoreError> {
        Ok(self.client.hgetall(&self.key(key)).await?)
    }

    async fn decrement_if_positive(
        &self,
        key: &str,
        field: &str,
    ) -> Result<DecrementOutcome, StoreError> {
        let result = self
            .client
            .decrement_if_positive(&self.key(key), field)
            .await?;

        match result {
            DECREMENT_MISSING => Ok(DecrementOutcome::Missing),
            DECREMENT_EXHAUSTED => Ok(DecrementOutcome::Exhausted),
            DECREMENT_MALFORMED => Err(StoreError::malformed(format!(
                "field {} is not numeric",
                field
            ))),
            remaining => {
                debug!(remaining, "Refresh counter decremented");
                Ok(DecrementOutcome::Decremented(remaining))
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.client.delete(&self.key(key)).await?)
    }
}
