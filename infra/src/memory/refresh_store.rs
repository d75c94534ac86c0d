//! In-memory [`RefreshStore`]
//!
//! Expiry is measured on the tokio clock. Expired records are dropped when
//! they are next touched and by [`InMemoryRefreshStore::purge_expired`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use auth_core::errors::StoreError;
use auth_core::repositories::{DecrementOutcome, RefreshFields, RefreshStore};

struct Entry {
    fields: RefreshFields,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Refresh-token store held in a map behind a single lock
#[derive(Default)]
pub struct InMemoryRefreshStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryRefreshStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired record; returns how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of records, expired ones included until purged
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl RefreshStore for InMemoryRefreshStore {
    async fn set_with_ttl(
        &self,
        key: &str,
        fields: &[(&str, String)],
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let entry = Entry {
            fields: fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<RefreshFields>, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.fields.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn decrement_if_positive(
        &self,
        key: &str,
        field: &str,
    ) -> Result<DecrementOutcome, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let Some(entry) = entries.get_mut(key) else {
            return Ok(DecrementOutcome::Missing);
        };
        if !entry.is_live(now) {
            entries.remove(key);
            return Ok(DecrementOutcome::Missing);
        }

        let current: i64 = entry
            .fields
            .get(field)
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| StoreError::malformed(format!("field {} is not numeric", field)))?;
        if current <= 0 {
            return Ok(DecrementOutcome::Exhausted);
        }

        entry.fields.insert(field.to_string(), (current - 1).to_string());
        Ok(DecrementOutcome::Decremented(current - 1))
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .await
            .remove(key)
            .is_some_and(|entry| entry.is_live(now)))
    }
}
