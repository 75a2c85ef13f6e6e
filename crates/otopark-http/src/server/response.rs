//! Response envelope for the facility endpoint
//!
//! Every facility request ends in exactly one of three bodies:
//!
//! ```text
//! {"error": "<message>"}                      store or query failure
//! {"success": true, "data": [ {...}, ... ]}    one or more records
//! {"success": false, "message": "<no data>"}   zero records
//! ```
//!
//! All three carry `Content-Type: application/json; charset=UTF-8` and
//! `Access-Control-Allow-Origin: *`.

use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use otopark_core::{messages, GatewayError, GatewayResult, ParkingFacility};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::error;

/// Content type of every envelope
pub const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Cross-origin policy of every envelope
pub const ALLOW_ANY_ORIGIN: &str = "*";

/// The wire payload of one facility request
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// The store could not be read
    Failure { status: StatusCode, message: String },
    /// One or more records
    Facilities(Vec<ParkingFacility>),
    /// The store holds no records
    NoData,
}

impl ResponsePayload {
    /// HTTP status for this payload
    pub fn status(&self) -> StatusCode {
        match self {
            ResponsePayload::Failure { status, .. } => *status,
            ResponsePayload::Facilities(_) | ResponsePayload::NoData => StatusCode::OK,
        }
    }

    /// The `success` flag, absent for failures
    pub fn success(&self) -> Option<bool> {
        match self {
            ResponsePayload::Failure { .. } => None,
            ResponsePayload::Facilities(_) => Some(true),
            ResponsePayload::NoData => Some(false),
        }
    }

    /// Render the JSON body
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

impl Serialize for ResponsePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponsePayload::Failure { message, .. } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
            ResponsePayload::Facilities(facilities) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", facilities)?;
                map.end()
            }
            ResponsePayload::NoData => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("message", messages::NO_DATA)?;
                map.end()
            }
        }
    }
}

impl IntoResponse for ResponsePayload {
    fn into_response(self) -> Response {
        let (status, body) = match self.to_json() {
            Ok(body) => (self.status(), body),
            Err(e) => {
                error!("[Response] Failed to serialize envelope: {}", e);
                let fallback = serde_json::json!({ "error": messages::QUERY_ERROR });
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    fallback.to_string().into_bytes(),
                )
            }
        };

        (
            status,
            [
                (CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8)),
                (
                    ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static(ALLOW_ANY_ORIGIN),
                ),
            ],
            body,
        )
            .into_response()
    }
}

/// Maps a gateway result to its envelope.
///
/// A pure mapping: records are passed through untouched, in the order the
/// gateway returned them.
#[derive(Debug, Clone, Copy)]
pub struct ResponseBuilder {
    expose_error_details: bool,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self {
            expose_error_details: true,
        }
    }
}

impl ResponseBuilder {
    /// `expose_error_details` controls whether the driver's failure cause is
    /// echoed in `{"error": ...}` bodies
    pub fn new(expose_error_details: bool) -> Self {
        Self {
            expose_error_details,
        }
    }

    pub fn build(&self, result: GatewayResult<Vec<ParkingFacility>>) -> ResponsePayload {
        match result {
            Err(err) => ResponsePayload::Failure {
                status: failure_status(&err),
                message: self.error_message(&err),
            },
            Ok(facilities) if facilities.is_empty() => ResponsePayload::NoData,
            Ok(facilities) => ResponsePayload::Facilities(facilities),
        }
    }

    fn error_message(&self, err: &GatewayError) -> String {
        let prefix = match err {
            GatewayError::Connection(_) => messages::CONNECTION_ERROR,
            GatewayError::Query(_) => messages::QUERY_ERROR,
        };
        if self.expose_error_details {
            format!("{}: {}", prefix, err.cause())
        } else {
            prefix.to_string()
        }
    }
}

/// Build the envelope with the default (detailed) error messages
pub fn build_response(result: GatewayResult<Vec<ParkingFacility>>) -> ResponsePayload {
    ResponseBuilder::default().build(result)
}

fn failure_status(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
        GatewayError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
