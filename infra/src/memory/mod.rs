//! In-process stores
//!
//! Used when no database or Redis is configured and by API tests. Nothing
//! survives a restart.

pub mod refresh_store;
pub mod user_repository;

#[cfg(test)]
mod tests;

pub use refresh_store::InMemoryRefreshStore;
pub use user_repository::InMemoryUserRepository;
