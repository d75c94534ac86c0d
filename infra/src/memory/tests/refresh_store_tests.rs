use std::sync::Arc;
use std::time::Duration;

use auth_core::repositories::{DecrementOutcome, RefreshStore};

use crate::memory::InMemoryRefreshStore;

const KEY: &str = "refresh:token";

async fn seeded(rate: &str, ttl: Duration) -> InMemoryRefreshStore {
    let store = InMemoryRefreshStore::new();
    store
        .set_with_ttl(
            KEY,
            &[("user_info", "u-1".to_string()), ("refresh_rate", rate.to_string())],
            ttl,
        )
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_decrement_stops_at_zero() {
    let store = seeded("2", Duration::from_secs(60)).await;

    assert_eq!(
        store.decrement_if_positive(KEY, "refresh_rate").await.unwrap(),
        DecrementOutcome::Decremented(1)
    );
    assert_eq!(
        store.decrement_if_positive(KEY, "refresh_rate").await.unwrap(),
        DecrementOutcome::Decremented(0)
    );
    assert_eq!(
        store.decrement_if_positive(KEY, "refresh_rate").await.unwrap(),
        DecrementOutcome::Exhausted
    );
    assert_eq!(store.get(KEY).await.unwrap().unwrap()["refresh_rate"], "0");
}

#[tokio::test]
async fn test_missing_key() {
    let store = InMemoryRefreshStore::new();

    assert!(store.get(KEY).await.unwrap().is_none());
    assert_eq!(
        store.decrement_if_positive(KEY, "refresh_rate").await.unwrap(),
        DecrementOutcome::Missing
    );
    assert!(!store.delete(KEY).await.unwrap());
}

#[tokio::test]
async fn test_non_numeric_field_is_malformed() {
    let store = seeded("many", Duration::from_secs(60)).await;

    assert!(store.decrement_if_positive(KEY, "refresh_rate").await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_records_expire() {
    let store = seeded("3", Duration::from_secs(30)).await;

    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(store.get(KEY).await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(store.get(KEY).await.unwrap().is_none());
    assert_eq!(
        store.decrement_if_positive(KEY, "refresh_rate").await.unwrap(),
        DecrementOutcome::Missing
    );
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = seeded("3", Duration::from_secs(30)).await;
    store
        .set_with_ttl("refresh:long", &[("refresh_rate", "3".to_string())], Duration::from_secs(300))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(60)).await;

    assert_eq!(store.purge_expired().await, 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_decrements_are_atomic() {
    let store = Arc::new(seeded("3", Duration::from_secs(60)).await);

    let handles: Vec<_> = (0..12)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.decrement_if_positive(KEY, "refresh_rate").await })
        })
        .collect();

    let mut decremented = 0;
    for handle in handles {
        if let DecrementOutcome::Decremented(_) = handle.await.unwrap().unwrap() {
            decremented += 1;
        }
    }
    assert_eq!(decremented, 3);
}
