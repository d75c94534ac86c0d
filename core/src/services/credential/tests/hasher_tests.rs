use std::sync::Arc;

use crate::services::credential::CredentialHasher;

/// Lowest cost bcrypt accepts
const TEST_COST: u32 = 4;

fn hasher() -> CredentialHasher {
    CredentialHasher::with_cost(TEST_COST, 2)
}

#[tokio::test]
async fn test_hash_then_verify() {
    let hasher = hasher();
    let hash = hasher.hash("Secr3t!").await.unwrap();

    assert!(hash.starts_with("$2"));
    assert!(hasher.verify(&hash, "Secr3t!").await);
    assert!(!hasher.verify(&hash, "Secr3t!x").await);
}

#[tokio::test]
async fn test_hash_is_salted() {
    let hasher = hasher();
    let first = hasher.hash("password").await.unwrap();
    let second = hasher.hash("password").await.unwrap();

    assert_ne!(first, second);
    assert!(hasher.verify(&first, "password").await);
    assert!(hasher.verify(&second, "password").await);
}

#[tokio::test]
async fn test_malformed_hash_is_false() {
    let hasher = hasher();
    assert!(!hasher.verify("not-a-bcrypt-hash", "password").await);
    assert!(!hasher.verify("", "").await);
}

#[tokio::test]
async fn test_empty_password_round_trip() {
    let hasher = hasher();
    let hash = hasher.hash("").await.unwrap();
    assert!(hasher.verify(&hash, "").await);
    assert!(!hasher.verify(&hash, "x").await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_hashing_with_single_permit() {
    let hasher = Arc::new(CredentialHasher::with_cost(TEST_COST, 1));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let hasher = hasher.clone();
            tokio::spawn(async move {
                let password = format!("password-{}", i);
                let hash = hasher.hash(&password).await.unwrap();
                hasher.verify(&hash, &password).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}
