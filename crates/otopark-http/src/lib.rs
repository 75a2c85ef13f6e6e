//! Otopark HTTP
//!
//! Read-only HTTP front for the parking facility store:
//! - `GET /`, `/get_parking_data.php`, `/api/parking` serve the facility envelope
//! - `GET /health` for liveness probes
//! - Per-request trace IDs and entry/exit logging

pub mod logging;
pub mod server;

pub use server::{
    build_response, AppState, FacilityServer, ResponseBuilder, ResponsePayload, FACILITY_PATHS,
};
