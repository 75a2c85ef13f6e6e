//! Response envelope tests through the router

use std::sync::Arc;

use axum::http::StatusCode;
use otopark_core::{GatewayError, ServerConfig};
use otopark_http::FacilityServer;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{fixtures, http, MockFacilityGateway};

fn router_for(gateway: MockFacilityGateway) -> axum::Router {
    FacilityServer::new(ServerConfig::default(), Arc::new(gateway)).router()
}

#[tokio::test]
async fn test_reference_scenario_body_is_exact() {
    let router = router_for(MockFacilityGateway::new().with_facility(fixtures::merkez()));

    let response = http::get(router, "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        r#"{"success":true,"data":[{"id":1,"name":"Merkez Otopark","capacity":100,"occupied":42}]}"#
    );
}

#[tokio::test]
async fn test_populated_store_returns_every_record() {
    let facilities = fixtures::test_facilities();
    let router = router_for(MockFacilityGateway::new().with_facilities(facilities.clone()));

    let body = http::get(router, "/get_parking_data.php").await.json();

    assert_eq!(body["success"], json!(true));
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), facilities.len());
    for (returned, stored) in data.iter().zip(&facilities) {
        assert_eq!(returned, &serde_json::to_value(stored).unwrap());
    }
}

#[tokio::test]
async fn test_empty_store_body_is_exact() {
    let router = router_for(MockFacilityGateway::new());

    let response = http::get(router, "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        r#"{"success":false,"message":"Otopark verisi bulunamadı"}"#
    );
}

#[tokio::test]
async fn test_connection_failure_body_has_only_error() {
    let router = router_for(MockFacilityGateway::failing(GatewayError::connection(
        "Can't connect to store on 'localhost'",
    )));

    let response = http::get(router, "/").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json(),
        json!({ "error": "Veritabanı bağlantı hatası: Can't connect to store on 'localhost'" })
    );
    let body = response.json();
    let object = body.as_object().unwrap();
    assert!(!object.contains_key("success"));
    assert!(!object.contains_key("data"));
}

#[tokio::test]
async fn test_query_failure_is_server_error() {
    let router = router_for(MockFacilityGateway::failing(GatewayError::query(
        "no such table: otoparklar",
    )));

    let response = http::get(router, "/api/parking").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        r#"{"error":"Sorgu hatası: no such table: otoparklar"}"#
    );
}

#[tokio::test]
async fn test_hidden_details_keep_cause_out_of_body() {
    let config = ServerConfig {
        expose_error_details: false,
        ..ServerConfig::default()
    };
    let gateway = MockFacilityGateway::failing(GatewayError::connection(
        "Access denied for user 'root'@'localhost' (using password: YES)",
    ));
    let router = FacilityServer::new(config, Arc::new(gateway)).router();

    let response = http::get(router, "/").await;

    assert_eq!(response.body, r#"{"error":"Veritabanı bağlantı hatası"}"#);
    assert!(!response.body.contains("root"));
}

#[tokio::test]
async fn test_non_ascii_names_round_trip() {
    let router = router_for(MockFacilityGateway::new().with_facility(fixtures::kizilay()));

    let response = http::get(router, "/").await;

    assert!(response.body.contains("Kızılay Çarşı Otoparkı"));
    assert_eq!(
        response.json()["data"][0]["name"],
        json!("Kızılay Çarşı Otoparkı")
    );
}

#[tokio::test]
async fn test_identical_requests_yield_identical_bodies() {
    let gateway = Arc::new(MockFacilityGateway::new().with_facilities(fixtures::test_facilities()));
    let router = FacilityServer::new(ServerConfig::default(), gateway.clone()).router();

    let first = http::get(router.clone(), "/").await;
    let second = http::get(router, "/").await;

    assert_eq!(first.body, second.body);
    assert_eq!(gateway.calls(), 2, "every request reads a fresh snapshot");
}

#[tokio::test]
async fn test_each_request_sees_current_records() {
    let gateway = Arc::new(MockFacilityGateway::new());
    let router = FacilityServer::new(ServerConfig::default(), gateway.clone()).router();

    let before = http::get(router.clone(), "/").await.json();
    gateway.set_facilities(vec![fixtures::merkez()]);
    let after = http::get(router, "/").await.json();

    assert_eq!(before["success"], json!(false));
    assert_eq!(after["success"], json!(true));
}
