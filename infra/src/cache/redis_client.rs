//! Redis client implementation
//!
//! Wraps a multiplexed connection with retry logic and the hash operations
//! the refresh-token store needs: writing a record together with its expiry,
//! reading it back, an atomic check-and-decrement of a counter field, and
//! deletion.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult, Script};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

/// Decrements `ARGV[1]` of hash `KEYS[1]` unless it is already zero.
///
/// Returns the new value, `-1` when exhausted, `-2` when the key is missing
/// and `-3` when the field is not a number.
const DECREMENT_IF_POSITIVE: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return -2
end
local current = tonumber(redis.call('HGET', KEYS[1], ARGV[1]))
if current == nil then
    return -3
end
if current <= 0 then
    return -1
end
return redis.call('HINCRBY', KEYS[1], ARGV[1], -1)
"#;

/// Result codes of [`DECREMENT_IF_POSITIVE`]
pub const DECREMENT_EXHAUSTED: i64 = -1;
pub const DECREMENT_MISSING: i64 = -2;
pub const DECREMENT_MALFORMED: i64 = -3;

/// Redis client with connection reuse and retry logic
///
/// Cloning is cheap; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Connect using `config`, retrying the initial connection with
    /// exponential backoff
    ///
    /// # Example
    /// ```no_run
    /// use auth_infra::config::CacheConfig;
    /// use auth_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, config.max_retries, config.retry_delay_ms)
                .await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Configuration this client was created with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Replace the hash at `key` with `fields` and expire it after
    /// `expiry_seconds`, in one MULTI/EXEC
    pub async fn hset_with_expiry(
        &self,
        key: &str,
        fields: &[(String, String)],
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let fields = fields.to_vec();
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let fields = fields.clone();
            Box::pin(async move {
                let mut pipe = redis::pipe();
                pipe.atomic()
                    .del(&key)
                    .ignore()
                    .hset_multiple(&key, &fields)
                    .ignore()
                    .expire(&key, expiry_seconds as i64)
                    .ignore();
                let result = pipe.query_async::<_, ()>(&mut conn).await;
                result
            })
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to write hash");
            InfrastructureError::Cache(e)
        })
    }

    /// Read every field of the hash at `key`; `None` when it does not exist
    pub async fn hgetall(
        &self,
        key: &str,
    ) -> Result<Option<HashMap<String, String>>, InfrastructureError> {
        let fields = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.hgetall::<_, HashMap<String, String>>(key).await })
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to read hash");
                InfrastructureError::Cache(e)
            })?;

        // HGETALL on a missing key yields an empty hash
        Ok(if fields.is_empty() { None } else { Some(fields) })
    }

    /// Atomically decrement `field` of the hash at `key` unless it is zero
    ///
    /// Returns the new value or one of the `DECREMENT_*` codes.
    ///
    /// The script is not idempotent. A connection error may arrive after the
    /// server already ran it, so only errors the server returns before
    /// executing anything are retried; a lost reply surfaces as an error
    /// instead of spending a second use.
    pub async fn decrement_if_positive(
        &self,
        key: &str,
        field: &str,
    ) -> Result<i64, InfrastructureError> {
        self.execute(Replay::Unsafe, |mut conn| {
            let key = key.to_string();
            let field = field.to_string();
            Box::pin(async move {
                let script = Script::new(DECREMENT_IF_POSITIVE);
                let result = script
                    .key(key)
                    .arg(field)
                    .invoke_async::<_, i64>(&mut conn)
                    .await;
                result
            })
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to decrement hash field");
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key; returns whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let deleted = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete key");
                InfrastructureError::Cache(e)
            })?;
        Ok(deleted > 0)
    }

    /// Check if the Redis connection is healthy with a PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Execute an idempotent Redis operation, retrying transient failures
    /// with exponential backoff
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        self.execute(Replay::Safe, operation).await
    }

    /// Execute a Redis operation, retrying the failures `replay` allows
    async fn execute<F, T>(&self, replay: Replay, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.config.max_retries && should_retry(&e, replay) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.config.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether an operation may be sent again after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Replay {
    /// Running the operation twice has the same effect as running it once
    Safe,
    /// The operation changes state on every run
    Unsafe,
}

/// Whether a failed operation should be attempted again under `replay`
pub(crate) fn should_retry(error: &RedisError, replay: Replay) -> bool {
    match replay {
        Replay::Safe => is_retriable_error(error),
        // Only replies proving the server did not run the command
        Replay::Unsafe => matches!(
            error.kind(),
            redis::ErrorKind::BusyLoadingError | redis::ErrorKind::TryAgain
        ),
    }
}

/// Whether a Redis error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
