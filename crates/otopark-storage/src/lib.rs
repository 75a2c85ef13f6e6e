//! Otopark Storage Layer
//!
//! Read-only access to the SQLite facility store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    HTTP handler                      │
//! ├──────────────────────────────────────────────────────┤
//! │            FacilityGateway (trait, core)             │
//! ├──────────────────────────────────────────────────────┤
//! │              SqliteFacilityGateway                   │
//! │   (connection limit, spawn_blocking, row mapping)    │
//! ├──────────────────────────────────────────────────────┤
//! │                   Database                           │
//! │     (read-only SQLite, closed on drop)               │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use otopark_core::{DatabaseConfig, FacilityGateway};
//! use otopark_storage::SqliteFacilityGateway;
//!
//! let gateway = SqliteFacilityGateway::new(DatabaseConfig::default())
//!     .with_max_connections(4);
//! let facilities = gateway.fetch_all_facilities().await?;
//! ```

mod database;
mod repositories;
pub mod value;

pub use database::{ConnectionCounter, Database};
pub use repositories::*;

/// Schema of the facility table, for provisioning and tests.
pub const FACILITY_SCHEMA: &str = include_str!("schema/otoparklar.sql");
