//! bcrypt-based credential hasher
//!
//! Hashing is CPU-bound, so every operation runs on tokio's blocking pool and
//! a semaphore caps how many run at once. Request-handling workers only await
//! the result.

use std::sync::Arc;

use auth_shared::config::HasherConfig;
use tokio::sync::Semaphore;
use tracing::{error, warn};

use crate::errors::{DomainError, DomainResult};

/// One-way password hashing with a tunable work factor
#[derive(Clone)]
pub struct CredentialHasher {
    cost: u32,
    permits: Arc<Semaphore>,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("cost", &self.cost)
            .field("available_permits", &self.permits.available_permits())
            .finish()
    }
}

impl CredentialHasher {
    /// Creates a hasher from configuration
    pub fn new(config: &HasherConfig) -> Self {
        Self::with_cost(config.cost, config.max_concurrent)
    }

    /// Creates a hasher with an explicit work factor and concurrency bound
    pub fn with_cost(cost: u32, max_concurrent: usize) -> Self {
        Self {
            cost,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Hashes `plaintext` with a fresh random salt embedded in the output
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - bcrypt hash string
    /// * `Err(DomainError::Internal)` - the hasher could not run
    pub async fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| DomainError::internal("password hashing", e))?;

        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::internal("password hashing", e))?
            .map_err(|e| {
                error!(error = %e, "bcrypt hashing failed");
                DomainError::internal("password hashing", e)
            })
    }

    /// Checks `plaintext` against `hash`
    ///
    /// A wrong password and a malformed hash both yield `false`.
    pub async fn verify(&self, hash: &str, plaintext: &str) -> bool {
        let Ok(_permit) = self.permits.acquire().await else {
            error!("credential hasher semaphore closed");
            return false;
        };

        let hash = hash.to_owned();
        let plaintext = plaintext.to_owned();
        match tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                warn!(error = %e, "stored password hash is malformed");
                false
            }
            Err(e) => {
                error!(error = %e, "password verification task failed");
                false
            }
        }
    }
}
