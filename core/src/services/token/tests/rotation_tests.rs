use std::sync::Arc;
use std::time::Duration;

use auth_shared::config::KeyConfig;

use crate::services::token::KeyRotationService;

use super::fixture_custodian;

#[test]
fn test_from_config_disabled() {
    let config = KeyConfig {
        rotation_enabled: false,
        ..KeyConfig::default()
    };
    assert!(KeyRotationService::from_config(fixture_custodian(), &config).is_none());
}

#[test]
fn test_from_config_zero_interval() {
    let config = KeyConfig {
        rotation_enabled: true,
        rotation_interval_secs: 0,
        ..KeyConfig::default()
    };
    assert!(KeyRotationService::from_config(fixture_custodian(), &config).is_none());
}

#[test]
fn test_from_config_enabled() {
    let config = KeyConfig {
        rotation_enabled: true,
        rotation_interval_secs: 600,
        ..KeyConfig::default()
    };
    let service = KeyRotationService::from_config(fixture_custodian(), &config).unwrap();
    assert_eq!(service.interval(), Duration::from_secs(600));
}

#[tokio::test]
async fn test_rotate_once_swaps_key() {
    let custodian = fixture_custodian();
    let old_kid = custodian.current_key_id();
    let service = KeyRotationService::new(custodian.clone(), Duration::from_secs(600));

    let new_kid = service.rotate_once().await.unwrap();

    assert_ne!(new_kid, old_kid);
    assert_eq!(custodian.current_key_id(), new_kid);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_background_task_rotates() {
    let custodian = fixture_custodian();
    let old_kid = custodian.current_key_id();
    let service = Arc::new(KeyRotationService::new(
        custodian.clone(),
        Duration::from_millis(100),
    ));

    let handle = service.start_background_task();

    let rotated = tokio::time::timeout(Duration::from_secs(60), async {
        while custodian.current_key_id() == old_kid {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    handle.abort();

    assert!(rotated.is_ok());
}
