//! ParkingFacility entity - one stored row describing a parking location

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column holding the store-assigned identifier
pub const FIELD_ID: &str = "id";
/// Column holding the display label
pub const FIELD_NAME: &str = "name";
/// Column holding the total number of spaces
pub const FIELD_CAPACITY: &str = "capacity";
/// Column holding the number of occupied spaces
pub const FIELD_OCCUPIED: &str = "occupied";

/// A parking facility record exactly as the store returned it.
///
/// Every column of the stored row is kept, in column order, with the value
/// type the store reported. Nothing is coerced or validated here; typed
/// accessors are provided for the well-known columns and return `None` when
/// a column is absent or holds an unexpected type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParkingFacility {
    fields: Map<String, Value>,
}

impl ParkingFacility {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already collected set of columns
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Add a column (builder style)
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Add a column in place
    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.fields.insert(column.into(), value);
    }

    /// Look up a column by name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Number of columns in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Store-assigned identifier, if it is an integer
    pub fn id(&self) -> Option<i64> {
        self.get(FIELD_ID).and_then(Value::as_i64)
    }

    /// Display label
    pub fn name(&self) -> Option<&str> {
        self.get(FIELD_NAME).and_then(Value::as_str)
    }

    /// Total spaces
    pub fn capacity(&self) -> Option<u64> {
        self.get(FIELD_CAPACITY).and_then(Value::as_u64)
    }

    /// Occupied spaces
    pub fn occupied(&self) -> Option<u64> {
        self.get(FIELD_OCCUPIED).and_then(Value::as_u64)
    }

    /// Free spaces, derived from capacity and occupancy.
    ///
    /// Saturates at zero when the store reports more occupied spaces than
    /// capacity.
    pub fn free_spaces(&self) -> Option<u64> {
        Some(self.capacity()?.saturating_sub(self.occupied()?))
    }
}

impl From<Map<String, Value>> for ParkingFacility {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(fields)
    }
}
