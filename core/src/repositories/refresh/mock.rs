//! Mock implementation of RefreshStore for testing
//!
//! Expiry follows the tokio clock so paused-time tests can advance past a TTL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::errors::StoreError;

use super::trait_::{DecrementOutcome, RefreshFields, RefreshStore};

#[derive(Default)]
pub struct MockRefreshStore {
    entries: Arc<Mutex<HashMap<String, (RefreshFields, Instant)>>>,
}

impl MockRefreshStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshStore for MockRefreshStore {
    async fn set_with_ttl(
        &self,
        key: &str,
        fields: &[(&str, String)],
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let record = fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (record, Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<RefreshFields>, StoreError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((fields, _)) => Ok(Some(fields.clone())),
            None => Ok(None),
        }
    }

    async fn decrement_if_positive(
        &self,
        key: &str,
        field: &str,
    ) -> Result<DecrementOutcome, StoreError> {
        let mut entries = self.entries.lock().await;
        let Some((fields, expires_at)) = entries.get_mut(key) else {
            return Ok(DecrementOutcome::Missing);
        };
        if *expires_at <= Instant::now() {
            entries.remove(key);
            return Ok(DecrementOutcome::Missing);
        }

        let current: i64 = fields
            .get(field)
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| StoreError::malformed(format!("field {} is not numeric", field)))?;
        if current <= 0 {
            return Ok(DecrementOutcome::Exhausted);
        }
        fields.insert(field.to_string(), (current - 1).to_string());
        Ok(DecrementOutcome::Decremented(current - 1))
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.lock().await.remove(key).is_some())
    }
}
