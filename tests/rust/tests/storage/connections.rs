//! Connection lifecycle tests
//!
//! Every fetch must give its connection back, whichever way it ends.

use std::sync::Arc;
use std::time::Duration;

use otopark_core::FacilityGateway;
use otopark_storage::SqliteFacilityGateway;
use tests::async_helpers::{with_timeout, DEFAULT_TIMEOUT};
use tests::db::TestStore;

#[tokio::test]
async fn test_connection_released_after_success() {
    let store = TestStore::new();
    store.insert("Merkez Otopark", 100, 42);
    let gateway = store.gateway();

    gateway.fetch_all_facilities().await.unwrap();

    assert_eq!(gateway.open_connections(), 0);
}

#[tokio::test]
async fn test_connection_released_after_empty_result() {
    let store = TestStore::new();
    let gateway = store.gateway();

    gateway.fetch_all_facilities().await.unwrap();

    assert_eq!(gateway.open_connections(), 0);
}

#[tokio::test]
async fn test_connection_released_after_query_error() {
    let store = TestStore::without_schema();
    let gateway = store.gateway();

    gateway.fetch_all_facilities().await.unwrap_err();

    assert_eq!(gateway.open_connections(), 0);
}

#[tokio::test]
async fn test_no_connection_held_after_connection_error() {
    let (_dir, config) = TestStore::missing();
    let gateway = SqliteFacilityGateway::new(config);

    gateway.fetch_all_facilities().await.unwrap_err();

    assert_eq!(gateway.open_connections(), 0);
}

/// Start `readers` fetches while the store is locked, so each one holds its
/// connection until the lock goes away. Returns the number of connections
/// open while the fetches were stuck.
async fn open_while_locked(
    store: &TestStore,
    gateway: Arc<SqliteFacilityGateway>,
    readers: usize,
) -> usize {
    let lock = store.lock_exclusive();

    let handles: Vec<_> = (0..readers)
        .map(|_| {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.fetch_all_facilities().await.unwrap().len() })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(300)).await;
    let stuck = gateway.open_connections();
    drop(lock);

    for handle in handles {
        let count = with_timeout(DEFAULT_TIMEOUT, handle).await.unwrap();
        assert_eq!(count, 20);
    }
    stuck
}

fn seeded_store() -> TestStore {
    let store = TestStore::new();
    for i in 0..20 {
        store.insert(&format!("Otopark {}", i), 100, i);
    }
    store
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_are_bounded_and_released() {
    let store = seeded_store();
    let gateway = Arc::new(store.gateway().with_max_connections(2));
    assert_eq!(gateway.max_connections(), 2);

    let stuck = open_while_locked(&store, gateway.clone(), 16).await;

    assert_eq!(stuck, 2, "waiting fetches must not open connections");
    assert_eq!(gateway.peak_connections(), 2);
    assert_eq!(gateway.open_connections(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_connection_serializes_reads() {
    let store = seeded_store();
    let gateway = Arc::new(store.gateway().with_max_connections(1));

    let stuck = open_while_locked(&store, gateway.clone(), 4).await;

    assert_eq!(stuck, 1);
    assert_eq!(gateway.peak_connections(), 1);
    assert_eq!(gateway.open_connections(), 0);
}
