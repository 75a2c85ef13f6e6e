//! Centralized branding constants
//!
//! All product naming comes from this module.
//!
//! # Usage
//!
//! ```rust
//! use otopark_core::branding;
//!
//! println!("App: {}", branding::DISPLAY_NAME);
//! let logs = branding::logs_dir();
//! ```

use std::path::PathBuf;

/// Human-readable product name
pub const DISPLAY_NAME: &str = "Otopark";

/// Directory name used under the platform data directory
pub const DATA_DIR_NAME: &str = "otopark";

/// Log file prefix (files look like `otopark.2026-01-22.log`)
pub const LOG_PREFIX: &str = "otopark";

/// Default HTTP port for the facility endpoint
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Get the application data directory for the current platform.
///
/// Falls back to the current directory when the platform has no data dir.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

/// Get the logs directory path (under the data directory)
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}
