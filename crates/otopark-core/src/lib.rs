//! # Otopark Core Library
//!
//! Domain types, configuration, and data access traits for Otopark.
//!
//! ## Modules
//!
//! - `branding` - Product naming and default locations
//! - `domain` - Core entities (ParkingFacility) and configuration
//! - `messages` - Client-facing message text
//! - `repository` - Data access traits and their error taxonomy

pub mod branding;
pub mod domain;
pub mod messages;
pub mod repository;

// Re-export commonly used types
pub use domain::*;
pub use repository::*;
