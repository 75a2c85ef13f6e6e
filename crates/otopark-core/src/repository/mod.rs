//! Repository traits for data access
//!
//! These traits define the interface for reading the facility store without
//! specifying the implementation (SQLite, in-memory, etc.)

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ParkingFacility;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures while reading the facility store.
///
/// An empty store is not an error; it is `Ok(vec![])`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The store could not be reached, opened, or authenticated against
    #[error("connection failed: {0}")]
    Connection(String),

    /// The read itself failed (missing table, schema mismatch, ...)
    #[error("query failed: {0}")]
    Query(String),
}

impl GatewayError {
    /// Create a connection error from any displayable cause
    pub fn connection<E: std::fmt::Display>(err: E) -> Self {
        GatewayError::Connection(err.to_string())
    }

    /// Create a query error from any displayable cause
    pub fn query<E: std::fmt::Display>(err: E) -> Self {
        GatewayError::Query(err.to_string())
    }

    /// The underlying driver message
    pub fn cause(&self) -> &str {
        match self {
            GatewayError::Connection(cause) | GatewayError::Query(cause) => cause,
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Connection(_) => "connection",
            GatewayError::Query(_) => "query",
        }
    }
}

/// Facility store gateway trait
///
/// Every call reads a full snapshot. Implementations must release whatever
/// store resources they acquire before returning, on every path.
#[async_trait]
pub trait FacilityGateway: Send + Sync {
    /// Fetch every facility record in the store's natural order
    async fn fetch_all_facilities(&self) -> GatewayResult<Vec<ParkingFacility>>;
}
