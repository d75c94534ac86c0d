//! Business services containing domain logic and use cases.

pub mod credential;
pub mod refresh;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use credential::CredentialHasher;
pub use refresh::RefreshTokenLedger;
pub use session::{SessionService, SessionServiceConfig};
pub use token::{
    verify_access_token, KeyCustodian, KeyRotationService, KeySource, TokenIssuer,
};
