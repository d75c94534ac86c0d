//! Tests for the in-memory stores

#[cfg(test)]
mod refresh_store_tests;
