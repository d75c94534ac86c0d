//! Sources of RSA signing key material

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::errors::KeyError;

/// Default size of generated signing keys
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Where the initial signing key pair comes from
#[derive(Clone)]
pub enum KeySource {
    /// PEM-encoded keys held in memory. The public half is optional; when
    /// present it must match the private key.
    Pem {
        private_pem: String,
        public_pem: Option<String>,
    },
    /// PEM files on disk
    Files {
        private_path: PathBuf,
        public_path: PathBuf,
    },
    /// A freshly generated key pair
    Generate { bits: usize },
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Pem { public_pem, .. } => f
                .debug_struct("Pem")
                .field("has_public_pem", &public_pem.is_some())
                .finish_non_exhaustive(),
            KeySource::Files {
                private_path,
                public_path,
            } => f
                .debug_struct("Files")
                .field("private_path", private_path)
                .field("public_path", public_path)
                .finish(),
            KeySource::Generate { bits } => f.debug_struct("Generate").field("bits", bits).finish(),
        }
    }
}

impl KeySource {
    /// Key files at the given paths
    pub fn files<P: AsRef<Path>>(private_path: P, public_path: P) -> Self {
        KeySource::Files {
            private_path: private_path.as_ref().to_path_buf(),
            public_path: public_path.as_ref().to_path_buf(),
        }
    }

    /// Reads the private key and checks the public half against it
    pub(crate) fn load(&self) -> Result<RsaPrivateKey, KeyError> {
        match self {
            KeySource::Pem {
                private_pem,
                public_pem,
            } => {
                let private_key = parse_private_key(private_pem)?;
                if let Some(public_pem) = public_pem {
                    ensure_pair(&private_key, &parse_public_key(public_pem)?)?;
                }
                Ok(private_key)
            }
            KeySource::Files {
                private_path,
                public_path,
            } => {
                let private_key = parse_private_key(&read_pem(private_path)?)?;
                let public_key = parse_public_key(&read_pem(public_path)?)?;
                ensure_pair(&private_key, &public_key)?;
                Ok(private_key)
            }
            KeySource::Generate { bits } => generate_private_key(*bits),
        }
    }
}

/// Generates a new RSA private key
pub(crate) fn generate_private_key(bits: usize) -> Result<RsaPrivateKey, KeyError> {
    RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| KeyError::Generation {
        message: e.to_string(),
    })
}

fn read_pem(path: &Path) -> Result<String, KeyError> {
    fs::read_to_string(path).map_err(|source| KeyError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts PKCS#8 (`PRIVATE KEY`) and PKCS#1 (`RSA PRIVATE KEY`)
fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, KeyError> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| KeyError::InvalidPrivateKey {
            message: e.to_string(),
        })
}

/// Accepts SPKI (`PUBLIC KEY`) and PKCS#1 (`RSA PUBLIC KEY`)
fn parse_public_key(pem: &str) -> Result<RsaPublicKey, KeyError> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| KeyError::InvalidPublicKey {
            message: e.to_string(),
        })
}

fn ensure_pair(private_key: &RsaPrivateKey, public_key: &RsaPublicKey) -> Result<(), KeyError> {
    if &private_key.to_public_key() == public_key {
        Ok(())
    } else {
        Err(KeyError::KeyMismatch)
    }
}
