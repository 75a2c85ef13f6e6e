//! Gateway implementations using SQLite.

mod facility_repository;

pub use facility_repository::{SqliteFacilityGateway, DEFAULT_MAX_CONNECTIONS, FACILITY_TABLE};
