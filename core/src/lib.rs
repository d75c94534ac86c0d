//! # Auth Core
//!
//! Session and credential logic for the authentication service.
//! This crate contains domain entities, store interfaces, the credential
//! hasher, signing-key custody, access-token issuance, the refresh-token
//! ledger and the session orchestrator built on top of them.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::{AccessClaims, Jwk, PublishedKeySet, TokenPair, User};
pub use errors::{
    BoxError, DomainError, DomainResult, KeyError, LedgerError, StoreError, TokenError,
};
pub use repositories::{DecrementOutcome, RefreshFields, RefreshStore, UserRepository};
pub use services::{
    verify_access_token, CredentialHasher, KeyCustodian, KeyRotationService, KeySource,
    RefreshTokenLedger, SessionService, SessionServiceConfig, TokenIssuer,
};
