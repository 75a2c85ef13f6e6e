//! Mapping from SQLite column values to JSON values.

use otopark_core::ParkingFacility;
use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde_json::{Number, Value};

/// Convert one column value, keeping the storage class the store reported.
///
/// Non-finite reals have no JSON form and become `null`. Text and blobs
/// become strings when they are valid UTF-8, otherwise an array of bytes.
pub fn column_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => bytes_to_json(bytes),
    }
}

fn bytes_to_json(bytes: &[u8]) -> Value {
    match std::str::from_utf8(bytes) {
        Ok(text) => Value::String(text.to_owned()),
        Err(_) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

/// Collect every column of `row` into a facility record, in column order.
pub fn row_to_facility(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<ParkingFacility> {
    let mut facility = ParkingFacility::new();
    for (index, column) in columns.iter().enumerate() {
        facility.insert(column.as_str(), column_to_json(row.get_ref(index)?));
    }
    Ok(facility)
}
