//! Scheduled signing-key rotation
//!
//! Runs [`KeyCustodian::rotate`] on a fixed interval in a background task.
//! Key generation happens on the blocking pool so request workers are not
//! stalled while a new RSA key is computed.

use std::sync::Arc;
use std::time::Duration;

use auth_shared::config::KeyConfig;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::errors::KeyError;

use super::key_custodian::KeyCustodian;

/// Background rotation of the active signing key
pub struct KeyRotationService {
    custodian: Arc<KeyCustodian>,
    interval: Duration,
}

impl KeyRotationService {
    /// Create a rotation service rotating every `interval`
    pub fn new(custodian: Arc<KeyCustodian>, interval: Duration) -> Self {
        Self {
            custodian,
            interval,
        }
    }

    /// Create a rotation service from configuration; `None` when rotation is
    /// disabled or the interval is zero
    pub fn from_config(custodian: Arc<KeyCustodian>, config: &KeyConfig) -> Option<Self> {
        if !config.rotation_enabled || config.rotation_interval_secs == 0 {
            return None;
        }
        Some(Self::new(
            custodian,
            Duration::from_secs(config.rotation_interval_secs),
        ))
    }

    /// Rotation interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single rotation
    ///
    /// # Returns
    /// * `Ok(String)` - id of the new key
    /// * `Err(KeyError)` - generation failed; the previous key stays active
    pub async fn rotate_once(&self) -> Result<String, KeyError> {
        let custodian = self.custodian.clone();
        tokio::task::spawn_blocking(move || custodian.rotate())
            .await
            .map_err(|e| KeyError::Generation {
                message: format!("rotation task failed: {}", e),
            })?
    }

    /// Start rotating in a background task
    ///
    /// The first rotation happens one interval after the call. Abort the
    /// returned handle to stop rotating.
    pub fn start_background_task(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_secs = self.interval.as_secs(),
                "Signing key rotation started"
            );

            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if let Err(e) = self.rotate_once().await {
                    error!(error = %e, "Signing key rotation failed; keeping current key");
                }
            }
        })
    }
}
