//! Refresh-token ledger
//!
//! Refresh tokens are opaque random ids. Each one maps to a store record
//! holding the owning user and a remaining-use counter; the record expires
//! with the token.

mod ledger;

#[cfg(test)]
mod tests;

pub use ledger::RefreshTokenLedger;
