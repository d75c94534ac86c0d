use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::entities::token::{refresh_key, REFRESH_FIELD_RATE};
use crate::errors::LedgerError;
use crate::repositories::refresh::{MockRefreshStore, RefreshStore};
use crate::services::refresh::RefreshTokenLedger;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn ledger() -> (RefreshTokenLedger<MockRefreshStore>, Arc<MockRefreshStore>) {
    let store = Arc::new(MockRefreshStore::new());
    (RefreshTokenLedger::with_default_limit(store.clone()), store)
}

#[tokio::test]
async fn test_issue_stores_user_and_rate() {
    let (ledger, store) = ledger();
    let user_id = Uuid::new_v4();

    let token = ledger.issue(user_id, DAY).await.unwrap();

    assert!(Uuid::parse_str(&token).is_ok());
    let fields = store.get(&refresh_key(&token)).await.unwrap().unwrap();
    assert_eq!(fields["user_info"], user_id.to_string());
    assert_eq!(fields[REFRESH_FIELD_RATE], "3");
    assert_eq!(ledger.rate_remaining(&token).await.unwrap(), Some(3));
}

#[tokio::test]
async fn test_tokens_are_unique() {
    let (ledger, _) = ledger();
    let user_id = Uuid::new_v4();

    let first = ledger.issue(user_id, DAY).await.unwrap();
    let second = ledger.issue(user_id, DAY).await.unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_redeem_allows_exactly_max_uses() {
    let (ledger, _) = ledger();
    let user_id = Uuid::new_v4();
    let token = ledger.issue(user_id, DAY).await.unwrap();

    for expected_remaining in [2, 1, 0] {
        assert_eq!(ledger.redeem(&token).await.unwrap(), user_id);
        assert_eq!(ledger.rate_remaining(&token).await.unwrap(), Some(expected_remaining));
    }

    assert!(matches!(
        ledger.redeem(&token).await,
        Err(LedgerError::RateExceeded)
    ));
    assert_eq!(ledger.rate_remaining(&token).await.unwrap(), Some(0));
}

#[tokio::test]
async fn test_custom_use_limit() {
    let store = Arc::new(MockRefreshStore::new());
    let ledger = RefreshTokenLedger::with_max_uses(store, 1);
    let token = ledger.issue(Uuid::new_v4(), DAY).await.unwrap();

    assert!(ledger.redeem(&token).await.is_ok());
    assert!(matches!(
        ledger.redeem(&token).await,
        Err(LedgerError::RateExceeded)
    ));
}

#[tokio::test]
async fn test_unknown_token() {
    let (ledger, _) = ledger();

    assert!(matches!(
        ledger.redeem("never-issued").await,
        Err(LedgerError::ExpiredOrUnknown)
    ));
    assert_eq!(ledger.rate_remaining("never-issued").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_expired_token_looks_unknown() {
    let (ledger, _) = ledger();
    let token = ledger
        .issue(Uuid::new_v4(), Duration::from_secs(60))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(61)).await;

    assert!(matches!(
        ledger.redeem(&token).await,
        Err(LedgerError::ExpiredOrUnknown)
    ));
    assert_eq!(ledger.rate_remaining(&token).await.unwrap(), None);
}

#[tokio::test]
async fn test_owner_names_the_issuing_user() {
    let (ledger, _) = ledger();
    let user_id = Uuid::new_v4();
    let token = ledger.issue(user_id, DAY).await.unwrap();

    assert_eq!(ledger.owner(&token).await.unwrap(), Some(user_id));
    assert_eq!(ledger.rate_remaining(&token).await.unwrap(), Some(3));

    ledger.revoke(&token).await.unwrap();
    assert_eq!(ledger.owner(&token).await.unwrap(), None);
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let (ledger, _) = ledger();
    let token = ledger.issue(Uuid::new_v4(), DAY).await.unwrap();

    assert!(ledger.revoke(&token).await.unwrap());
    assert!(!ledger.revoke(&token).await.unwrap());
    assert!(matches!(
        ledger.redeem(&token).await,
        Err(LedgerError::ExpiredOrUnknown)
    ));
}

#[tokio::test]
async fn test_malformed_record_is_store_error() {
    let (ledger, store) = ledger();
    store
        .set_with_ttl(
            &refresh_key("broken"),
            &[("user_info", "not-a-uuid".to_string()), (REFRESH_FIELD_RATE, "3".to_string())],
            DAY,
        )
        .await
        .unwrap();

    assert!(matches!(
        ledger.redeem("broken").await,
        Err(LedgerError::Store(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_redeem_never_exceeds_limit() {
    let (ledger, _) = ledger();
    let token = ledger.issue(Uuid::new_v4(), DAY).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let ledger = ledger.clone();
            let token = token.clone();
            tokio::spawn(async move { ledger.redeem(&token).await })
        })
        .collect();

    let mut successes = 0;
    let mut exhausted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(LedgerError::RateExceeded) => exhausted += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(successes, 3);
    assert_eq!(exhausted, 13);
}
