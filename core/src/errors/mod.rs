//! Domain-specific error types and error handling.
//!
//! [`DomainError`] is the closed set of outcomes the session layer reports to
//! callers. Component errors ([`KeyError`], [`TokenError`], [`LedgerError`],
//! [`StoreError`]) carry the detail that ends up in logs.

mod types;


pub use types::{BoxError, KeyError, LedgerError, StoreError, TokenError};

use thiserror::Error;

/// Errors surfaced by the session layer
#[derive(Error, Debug)]
pub enum DomainError {
    /// Registration input failed validation
    #[error("Bad credentials: {reason}")]
    BadCredentials { reason: String },

    /// Unknown login identifier or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh token unknown or past its lifetime
    #[error("Refresh token expired")]
    ExpiredToken,

    /// Refresh token has no uses left
    #[error("Too many requests")]
    TooManyRequests,

    /// Store or signing failure. The source is kept for logs and never
    /// rendered in the message.
    #[error("Internal error during {operation}")]
    Internal {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// A downstream store did not answer in time
    #[error("Service unavailable during {operation}")]
    Unavailable { operation: &'static str },
}

impl DomainError {
    /// Wrap a store or signing failure with the operation that hit it
    pub fn internal(operation: &'static str, source: impl Into<BoxError>) -> Self {
        DomainError::Internal {
            operation,
            source: source.into(),
        }
    }

    /// Construct a bad-credentials error with a reason
    pub fn bad_credentials(reason: impl Into<String>) -> Self {
        DomainError::BadCredentials {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::BadCredentials { .. } => "BAD_CREDENTIALS",
            DomainError::InvalidCredentials => "INVALID_CREDENTIALS",
            DomainError::ExpiredToken => "TOKEN_EXPIRED",
            DomainError::TooManyRequests => "RATE_LIMIT_EXCEEDED",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Unavailable { .. } => "SERVICE_UNAVAILABLE",
        }
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ExpiredOrUnknown => DomainError::ExpiredToken,
            LedgerError::RateExceeded => DomainError::TooManyRequests,
            LedgerError::Store(source) => DomainError::internal("refresh store", source),
        }
    }
}

impl From<KeyError> for DomainError {
    fn from(err: KeyError) -> Self {
        DomainError::internal("token signing", err)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
