//! Cache module for Redis-backed storage
//!
//! This module provides the Redis client with retry logic and the
//! refresh-token store built on top of it.

pub mod redis_client;
pub mod refresh_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use refresh_store::RedisRefreshStore;

// Re-export commonly used types
pub use auth_shared::config::CacheConfig;
