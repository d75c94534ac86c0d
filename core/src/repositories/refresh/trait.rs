//! Key-value store with per-key TTL backing the refresh-token ledger.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::StoreError;

/// Field map of a stored record
pub type RefreshFields = HashMap<String, String>;

/// Result of an atomic check-and-decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// The key does not exist (never written, deleted or expired)
    Missing,
    /// The counter was already zero; nothing was written
    Exhausted,
    /// The counter was decremented; holds the new value
    Decremented(i64),
}

/// TTL-capable key-value store
///
/// `decrement_if_positive` must be atomic per key: two concurrent calls on a
/// counter holding `1` yield exactly one `Decremented(0)` and one `Exhausted`.
/// Adapters retry transient backend failures themselves.
#[async_trait]
pub trait RefreshStore: Send + Sync {
    /// Write `fields` under `key`, replacing any previous record, and expire it after `ttl`
    async fn set_with_ttl(
        &self,
        key: &str,
        fields: &[(&str, String)],
        ttl: Duration,
    ) -> Result<(), StoreError>;

    /// Read all fields of `key`; `None` on a miss
    async fn get(&self, key: &str) -> Result<Option<RefreshFields>, StoreError>;

    /// Decrement the numeric `field` of `key` unless it is already zero
    async fn decrement_if_positive(
        &self,
        key: &str,
        field: &str,
    ) -> Result<DecrementOutcome, StoreError>;

    /// Remove `key`; returns whether it existed
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}
