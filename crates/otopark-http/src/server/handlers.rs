//! HTTP handlers for the facility server

use std::sync::Arc;

use axum::{extract::State, response::Json};
use otopark_core::FacilityGateway;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::response::{ResponseBuilder, ResponsePayload};

/// Shared handler state: the store gateway and the envelope builder
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn FacilityGateway>,
    pub builder: ResponseBuilder,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    debug!("[Server] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Facility read endpoint
///
/// Reads a full snapshot through the gateway and wraps it in the envelope.
/// The raw failure cause is always logged here, whether or not the builder
/// echoes it to the client.
pub async fn get_parking_data(State(state): State<AppState>) -> ResponsePayload {
    let result = state.gateway.fetch_all_facilities().await;

    match &result {
        Ok(facilities) if facilities.is_empty() => {
            warn!("[Facilities] Store returned no records");
        }
        Ok(facilities) => {
            info!("[Facilities] Serving {} records", facilities.len());
        }
        Err(e) => {
            error!(
                kind = e.kind(),
                cause = %e.cause(),
                "[Facilities] Store read failed"
            );
        }
    }

    state.builder.build(result)
}
