//! Tests for the refresh-token ledger

#[cfg(test)]
mod ledger_tests;
