//! Tests for the credential hasher

#[cfg(test)]
mod hasher_tests;
