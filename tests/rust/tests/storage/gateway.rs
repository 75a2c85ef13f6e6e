//! SqliteFacilityGateway integration tests

use otopark_core::{FacilityGateway, GatewayError};
use otopark_storage::SqliteFacilityGateway;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::db::TestStore;

#[tokio::test]
async fn test_fetch_all_returns_every_row() {
    let store = TestStore::new();
    store.insert("Merkez Otopark", 100, 42);
    store.insert("Gar Otoparkı", 250, 17);
    store.insert("Hastane Otoparkı", 80, 80);

    let facilities = store.gateway().fetch_all_facilities().await.unwrap();

    assert_eq!(facilities.len(), 3);
    let names: Vec<_> = facilities.iter().filter_map(|f| f.name()).collect();
    assert_eq!(names, vec!["Merkez Otopark", "Gar Otoparkı", "Hastane Otoparkı"]);
}

#[tokio::test]
async fn test_every_column_is_passed_through() {
    let store = TestStore::new();
    store.execute_batch(
        "INSERT INTO otoparklar (id, name, capacity, occupied, latitude, longitude, address)
         VALUES (1, 'Merkez Otopark', 100, 42, 39.9334, 32.8597, 'Atatürk Blv. No:1')",
    );

    let facilities = store.gateway().fetch_all_facilities().await.unwrap();

    assert_eq!(facilities.len(), 1);
    assert_eq!(
        serde_json::to_value(&facilities[0]).unwrap(),
        json!({
            "id": 1,
            "name": "Merkez Otopark",
            "capacity": 100,
            "occupied": 42,
            "latitude": 39.9334,
            "longitude": 32.8597,
            "address": "Atatürk Blv. No:1"
        })
    );
}

#[tokio::test]
async fn test_null_columns_surface_as_null() {
    let store = TestStore::new();
    store.insert("Ulus", 50, 10);

    let facilities = store.gateway().fetch_all_facilities().await.unwrap();

    assert_eq!(facilities[0].get("latitude"), Some(&json!(null)));
    assert_eq!(facilities[0].get("address"), Some(&json!(null)));
}

#[tokio::test]
async fn test_stored_types_are_not_coerced() {
    // A loosely typed table, as older deployments created it
    let store = TestStore::without_schema();
    store.execute_batch(
        "CREATE TABLE otoparklar (id TEXT, name TEXT, capacity, occupied);
         INSERT INTO otoparklar VALUES ('P-1', 'Kızılay', '120', 30);",
    );

    let facilities = store.gateway().fetch_all_facilities().await.unwrap();

    assert_eq!(facilities[0].get("id"), Some(&json!("P-1")));
    assert_eq!(facilities[0].get("capacity"), Some(&json!("120")));
    assert_eq!(facilities[0].get("occupied"), Some(&json!(30)));
}

#[tokio::test]
async fn test_occupied_above_capacity_is_surfaced_as_stored() {
    let store = TestStore::without_schema();
    store.execute_batch(
        "CREATE TABLE otoparklar (id INTEGER PRIMARY KEY, name TEXT, capacity INTEGER, occupied INTEGER);
         INSERT INTO otoparklar VALUES (1, 'Taşan', 10, 14);",
    );

    let facilities = store.gateway().fetch_all_facilities().await.unwrap();

    assert_eq!(facilities[0].occupied(), Some(14));
    assert_eq!(facilities[0].capacity(), Some(10));
}

#[tokio::test]
async fn test_non_ascii_text_round_trips() {
    let store = TestStore::new();
    let name = "Çankaya Şehir Otoparkı – Güneş Cad. (İç Kısım)";
    store.insert(name, 60, 5);

    let facilities = store.gateway().fetch_all_facilities().await.unwrap();
    let encoded = serde_json::to_string(&facilities).unwrap();
    let decoded: serde_json::Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded[0]["name"], json!(name));
}

#[tokio::test]
async fn test_empty_table_is_not_an_error() {
    let store = TestStore::new();

    let facilities = store.gateway().fetch_all_facilities().await.unwrap();

    assert!(facilities.is_empty());
}

#[tokio::test]
async fn test_missing_table_is_query_error() {
    let store = TestStore::without_schema();

    let err = store.gateway().fetch_all_facilities().await.unwrap_err();

    assert!(matches!(err, GatewayError::Query(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_missing_store_is_connection_error() {
    let (_dir, config) = TestStore::missing();
    let path = config.database_path();

    let err = SqliteFacilityGateway::new(config)
        .fetch_all_facilities()
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Connection(_)), "got {:?}", err);
    assert!(!path.exists(), "a read must never create the store");
}

#[tokio::test]
async fn test_repeated_reads_see_current_snapshot() {
    let store = TestStore::new();
    let gateway = store.gateway();
    store.insert("Merkez Otopark", 100, 42);

    let first = gateway.fetch_all_facilities().await.unwrap();
    let second = gateway.fetch_all_facilities().await.unwrap();
    assert_eq!(first, second);

    store.execute_batch("UPDATE otoparklar SET occupied = 43");
    let third = gateway.fetch_all_facilities().await.unwrap();
    assert_eq!(third[0].occupied(), Some(43));
}
