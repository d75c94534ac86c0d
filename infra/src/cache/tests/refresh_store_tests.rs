//! Refresh store tests against a live Redis server

use std::time::Duration;

use auth_core::repositories::{DecrementOutcome, RefreshStore};

use crate::cache::{RedisClient, RedisRefreshStore};
use crate::config::CacheConfig;

async fn store() -> RedisRefreshStore {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix("auth_test");
    RedisRefreshStore::new(RedisClient::new(config).await.unwrap())
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_record_lifecycle() {
    let store = store().await;
    let key = format!("refresh:{}", uuid::Uuid::new_v4());

    store
        .set_with_ttl(
            &key,
            &[("user_info", "u-1".to_string()), ("refresh_rate", "2".to_string())],
            Duration::from_secs(60),
        )
        .await
        .unwrap();

    let fields = store.get(&key).await.unwrap().unwrap();
    assert_eq!(fields["user_info"], "u-1");

    assert_eq!(
        store.decrement_if_positive(&key, "refresh_rate").await.unwrap(),
        DecrementOutcome::Decremented(1)
    );
    assert_eq!(
        store.decrement_if_positive(&key, "refresh_rate").await.unwrap(),
        DecrementOutcome::Decremented(0)
    );
    assert_eq!(
        store.decrement_if_positive(&key, "refresh_rate").await.unwrap(),
        DecrementOutcome::Exhausted
    );

    assert!(store.delete(&key).await.unwrap());
    assert!(store.get(&key).await.unwrap().is_none());
    assert_eq!(
        store.decrement_if_positive(&key, "refresh_rate").await.unwrap(),
        DecrementOutcome::Missing
    );
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_record_expires() {
    let store = store().await;
    let key = format!("refresh:{}", uuid::Uuid::new_v4());

    store
        .set_with_ttl(&key, &[("refresh_rate", "3".to_string())], Duration::from_secs(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(store.get(&key).await.unwrap().is_none());
}
