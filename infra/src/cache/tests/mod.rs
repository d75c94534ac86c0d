//! Tests for the Redis client and refresh store

#[cfg(test)]
mod refresh_store_tests;
