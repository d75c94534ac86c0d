//! Shared response helpers

pub mod error_handler;
