//! Tests for key custody, token issuance and rotation

use std::sync::{Arc, OnceLock};

use rand::rngs::OsRng;
use rsa::RsaPrivateKey;

use crate::services::token::KeyCustodian;

#[cfg(test)]
mod key_custodian_tests;
#[cfg(test)]
mod rotation_tests;

static FIXTURE_KEYS: OnceLock<Vec<RsaPrivateKey>> = OnceLock::new();

/// Shared 2048-bit keys, generated once per test binary
pub(crate) fn fixture_key(index: usize) -> &'static RsaPrivateKey {
    &FIXTURE_KEYS.get_or_init(|| {
        (0..2)
            .map(|_| RsaPrivateKey::new(&mut OsRng, 2048).expect("generate fixture key"))
            .collect()
    })[index]
}

/// Custodian holding the first fixture key
pub(crate) fn fixture_custodian() -> Arc<KeyCustodian> {
    Arc::new(KeyCustodian::from_private_key(fixture_key(0)).expect("load fixture key"))
}
