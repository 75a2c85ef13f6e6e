//! Domain entities and configuration

mod config;
mod facility;

pub use config::{env, AppConfig, ConfigError, DatabaseConfig, ServerConfig, LOCALHOST};
pub use facility::{
    ParkingFacility, FIELD_CAPACITY, FIELD_ID, FIELD_NAME, FIELD_OCCUPIED,
};
