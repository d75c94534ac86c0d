//! # Infrastructure Layer
//!
//! Concrete implementations of the stores the session core depends on.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL user store using SQLx
//! - **Cache**: Redis client and the Redis-backed refresh-token store
//! - **Memory**: in-process stores for development and tests
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use auth_core::errors::StoreError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and refresh-token store
pub mod cache;

/// In-memory store implementations
pub mod memory;

/// Configuration module for infrastructure services
pub mod config {
    //! Connection settings for the stores, shared with the API crate
    pub use auth_shared::config::{CacheConfig, DatabaseConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        StoreError::backend(err)
    }
}
