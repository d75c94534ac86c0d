//! Custody of the active RS256 signing key pair
//!
//! The private key never leaves this module except as an opaque
//! [`SigningKey`] handle inside the crate. The key id and the published key
//! set are derived from the same key and swapped together, so a reader sees
//! either the old generation or the new one as a whole.

use std::sync::{Arc, PoisonError, RwLock};

use auth_shared::config::KeyConfig;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::EncodingKey;
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::domain::value_objects::{Jwk, PublishedKeySet};
use crate::errors::KeyError;

use super::key_source::{generate_private_key, KeySource, DEFAULT_KEY_BITS};

/// Handle to the private half of the active key
pub(crate) struct SigningKey {
    pub(crate) kid: String,
    pub(crate) encoding_key: EncodingKey,
}

/// One key generation: the signing handle plus its public projection
struct KeyGeneration {
    signing: Arc<SigningKey>,
    key_set: PublishedKeySet,
}

impl KeyGeneration {
    fn from_private_key(private_key: &RsaPrivateKey) -> Result<Self, KeyError> {
        let pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| KeyError::InvalidPrivateKey {
                message: e.to_string(),
            })?;
        let encoding_key =
            EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| KeyError::InvalidPrivateKey {
                message: e.to_string(),
            })?;

        let public_key = private_key.to_public_key();
        let modulus = public_key.n().to_bytes_be();
        let kid = key_id(&modulus);
        let jwk = Jwk::rs256(
            kid.clone(),
            URL_SAFE_NO_PAD.encode(&modulus),
            URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        );

        Ok(Self {
            signing: Arc::new(SigningKey { kid, encoding_key }),
            key_set: PublishedKeySet { keys: vec![jwk] },
        })
    }
}

/// First 16 hex chars of SHA-256 over the big-endian modulus
fn key_id(modulus: &[u8]) -> String {
    let digest = Sha256::digest(modulus);
    hex::encode(&digest[..8])
}

/// Owner of the active signing key pair
pub struct KeyCustodian {
    active: RwLock<Arc<KeyGeneration>>,
    rotation_key_bits: usize,
}

impl std::fmt::Debug for KeyCustodian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCustodian")
            .field("kid", &self.current_key_id())
            .field("rotation_key_bits", &self.rotation_key_bits)
            .finish()
    }
}

impl KeyCustodian {
    /// Loads the initial key pair from `source`
    ///
    /// Failure here is meant to abort startup.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use auth_core::services::token::{KeyCustodian, KeySource};
    ///
    /// let custodian = KeyCustodian::from_source(KeySource::files(
    ///     "keys/jwt_private_key.pem",
    ///     "keys/jwt_public_key.pem",
    /// ))
    /// .expect("Failed to load keys");
    /// println!("active key: {}", custodian.current_key_id());
    /// ```
    pub fn from_source(source: KeySource) -> Result<Self, KeyError> {
        let rotation_key_bits = match &source {
            KeySource::Generate { bits } => *bits,
            _ => DEFAULT_KEY_BITS,
        };
        let private_key = source.load()?;
        let generation = KeyGeneration::from_private_key(&private_key)?;

        info!(kid = %generation.signing.kid, source = ?source, "Signing key loaded");

        Ok(Self {
            active: RwLock::new(Arc::new(generation)),
            rotation_key_bits,
        })
    }

    /// Builds a custodian from configuration: key files when both paths are
    /// set, a generated key pair otherwise
    pub fn from_config(config: &KeyConfig) -> Result<Self, KeyError> {
        let source = match config.key_paths() {
            Some((private_path, public_path)) => KeySource::files(private_path, public_path),
            None => KeySource::Generate {
                bits: config.generated_key_bits,
            },
        };
        let mut custodian = Self::from_source(source)?;
        custodian.rotation_key_bits = config.generated_key_bits;
        Ok(custodian)
    }

    /// Builds a custodian from `JWT_PRIVATE_KEY_PATH` / `JWT_PUBLIC_KEY_PATH`
    pub fn from_env() -> Result<Self, KeyError> {
        Self::from_config(&KeyConfig::from_env())
    }

    /// Creates a custodian around an existing private key
    pub fn from_private_key(private_key: &RsaPrivateKey) -> Result<Self, KeyError> {
        let generation = KeyGeneration::from_private_key(private_key)?;
        Ok(Self {
            active: RwLock::new(Arc::new(generation)),
            rotation_key_bits: DEFAULT_KEY_BITS,
        })
    }

    fn snapshot(&self) -> Arc<KeyGeneration> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the active private key for signing
    pub(crate) fn current_private_key(&self) -> Arc<SigningKey> {
        self.snapshot().signing.clone()
    }

    /// Returns the current publishable key material
    pub fn public_key_set(&self) -> PublishedKeySet {
        self.snapshot().key_set.clone()
    }

    /// Id of the active key
    pub fn current_key_id(&self) -> String {
        self.snapshot().signing.kid.clone()
    }

    /// Replaces the active key pair with a freshly generated one
    ///
    /// Key generation runs before the write lock is taken; only the swap is
    /// exclusive. This call is CPU-heavy, so async callers should run it on
    /// the blocking pool.
    ///
    /// # Returns
    ///
    /// The id of the new key
    pub fn rotate(&self) -> Result<String, KeyError> {
        let private_key = generate_private_key(self.rotation_key_bits)?;
        self.install(&private_key)
    }

    /// Makes `private_key` the active key pair
    pub fn install(&self, private_key: &RsaPrivateKey) -> Result<String, KeyError> {
        let generation = Arc::new(KeyGeneration::from_private_key(private_key)?);
        let kid = generation.signing.kid.clone();

        let previous = {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *active, generation)
        };

        info!(previous_kid = %previous.signing.kid, kid = %kid, "Signing key rotated");
        Ok(kid)
    }
}
