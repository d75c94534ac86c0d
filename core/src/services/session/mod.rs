//! Session orchestration
//!
//! This module handles:
//! - registration and login, returning an access/refresh token pair
//! - exchanging a refresh token for a new access token
//! - logout with refresh-token revocation
//! - publishing the current signing key set

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::SessionServiceConfig;
pub use service::SessionService;
