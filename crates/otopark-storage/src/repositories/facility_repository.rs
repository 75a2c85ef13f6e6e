//! SQLite implementation of FacilityGateway.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use otopark_core::{DatabaseConfig, FacilityGateway, GatewayError, GatewayResult, ParkingFacility};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::database::{ConnectionCounter, Database};
use crate::value::row_to_facility;

/// Table holding the facility records
pub const FACILITY_TABLE: &str = "otoparklar";

/// The fixed read: every column of every facility, in store order
const SELECT_ALL_FACILITIES: &str = "SELECT * FROM otoparklar";

/// Default bound on simultaneously open connections
pub const DEFAULT_MAX_CONNECTIONS: usize = 8;

/// SQLite-backed implementation of FacilityGateway.
///
/// Opens a fresh read-only connection for every fetch. A semaphore bounds
/// how many fetches hold a connection at once; the rest wait for a slot.
pub struct SqliteFacilityGateway {
    config: DatabaseConfig,
    path: PathBuf,
    limiter: Arc<Semaphore>,
    max_connections: usize,
    connections: ConnectionCounter,
}

impl SqliteFacilityGateway {
    /// Create a gateway for the store described by `config`.
    pub fn new(config: DatabaseConfig) -> Self {
        let path = config.database_path();
        info!(
            "[FacilityGateway] Store at {:?} (user: {})",
            path, config.user
        );
        Self {
            config,
            path,
            limiter: Arc::new(Semaphore::new(DEFAULT_MAX_CONNECTIONS)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connections: ConnectionCounter::new(),
        }
    }

    /// Bound the number of simultaneously open connections (minimum 1)
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        let max_connections = max_connections.max(1);
        self.limiter = Arc::new(Semaphore::new(max_connections));
        self.max_connections = max_connections;
        self
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Resolved database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Connections currently open through this gateway
    pub fn open_connections(&self) -> usize {
        self.connections.current()
    }

    /// Most connections this gateway ever had open at once
    pub fn peak_connections(&self) -> usize {
        self.connections.peak()
    }
}

/// Open, read, and close. The connection is released when `db` drops at the
/// end of this function, whichever way it returns.
fn read_all_facilities(
    path: &Path,
    counter: &ConnectionCounter,
) -> GatewayResult<Vec<ParkingFacility>> {
    let db = Database::open(path, counter)?;
    let conn = db.connection();

    let mut stmt = conn
        .prepare(SELECT_ALL_FACILITIES)
        .map_err(GatewayError::query)?;

    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let facilities = stmt
        .query_map([], |row| row_to_facility(row, &columns))
        .map_err(GatewayError::query)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(GatewayError::query)?;

    for facility in &facilities {
        debug!(
            "[FacilityGateway] Found facility: {} ({:?}), free {:?}",
            facility.name().unwrap_or("?"),
            facility.id(),
            facility.free_spaces()
        );
    }

    Ok(facilities)
}

#[async_trait]
impl FacilityGateway for SqliteFacilityGateway {
    async fn fetch_all_facilities(&self) -> GatewayResult<Vec<ParkingFacility>> {
        let permit = self
            .limiter
            .clone()
            .acquire_owned()
            .await
            .map_err(GatewayError::connection)?;

        let path = self.path.clone();
        let counter = self.connections.clone();

        let facilities = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            read_all_facilities(&path, &counter)
        })
        .await
        .map_err(|e| GatewayError::query(format!("store task failed: {}", e)))??;

        debug!(
            "[FacilityGateway] Returning {} facilities",
            facilities.len()
        );

        Ok(facilities)
    }
}
