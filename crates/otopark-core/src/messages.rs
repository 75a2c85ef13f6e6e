//! Client-facing message text.
//!
//! Existing mobile clients display these strings verbatim, so they stay in
//! Turkish.

/// Message returned when the facility table holds no rows
pub const NO_DATA: &str = "Otopark verisi bulunamadı";

/// Prefix for store connection failures
pub const CONNECTION_ERROR: &str = "Veritabanı bağlantı hatası";

/// Prefix for query failures
pub const QUERY_ERROR: &str = "Sorgu hatası";
