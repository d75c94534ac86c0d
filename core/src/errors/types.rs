//! Component-level error types for key custody, token verification,
//! the refresh-token ledger and external stores

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error used as the source of wrapped failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while loading, generating or signing with key material
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid private key: {message}")]
    InvalidPrivateKey { message: String },

    #[error("Invalid public key: {message}")]
    InvalidPublicKey { message: String },

    #[error("Public key does not belong to the private key")]
    KeyMismatch,

    #[error("Key generation failed: {message}")]
    Generation { message: String },

    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Errors raised while verifying an access token against a published key set
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token signed with unknown key id")]
    UnknownKeyId,

    #[error("Invalid token format")]
    InvalidFormat,
}

/// Errors raised by the refresh-token ledger
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The record is absent: never issued, revoked or past its TTL
    #[error("Refresh token expired or unknown")]
    ExpiredOrUnknown,

    /// The record has no remaining uses
    #[error("Refresh token use limit reached")]
    RateExceeded,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors returned by external store adapters
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique field is already taken
    #[error("Duplicate value for {field}")]
    Duplicate { field: String },

    /// A stored record could not be decoded
    #[error("Malformed record: {message}")]
    Malformed { message: String },

    /// The backend failed
    #[error("Store backend error: {0}")]
    Backend(#[source] BoxError),
}

impl StoreError {
    /// Wrap a backend failure
    pub fn backend(source: impl Into<BoxError>) -> Self {
        StoreError::Backend(source.into())
    }

    /// Construct a malformed-record error
    pub fn malformed(message: impl Into<String>) -> Self {
        StoreError::Malformed {
            message: message.into(),
        }
    }
}
