//! Signing keys and access tokens
//!
//! This module handles:
//! - custody of the RS256 signing key pair and its published key set
//! - scheduled key rotation
//! - access-token signing
//! - access-token verification for consumers of the key set

mod issuer;
mod key_custodian;
mod key_source;
mod rotation;
mod verifier;

#[cfg(test)]
pub(crate) mod tests;

pub use issuer::TokenIssuer;
pub use key_custodian::KeyCustodian;
pub use key_source::{KeySource, DEFAULT_KEY_BITS};
pub use rotation::KeyRotationService;
pub use verifier::verify_access_token;
