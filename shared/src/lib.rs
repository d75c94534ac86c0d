//! Shared utilities and common types for the authentication service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Validation helpers (email shape, identifier masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, HasherConfig, KeyConfig,
    LogFormat, LoggingConfig, ServerConfig, SessionConfig, TokenConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
