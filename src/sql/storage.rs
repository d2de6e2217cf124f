//! Destination type to column type lookup.

use thiserror::Error;

use super::types::ColumnType;
use crate::classify::DestinationType;

/// A destination type with no column mapping.
///
/// This is a configuration gap (or an unresolved `REPLACE_ME` left in the
/// CSV), not a data error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no storage type for destination type {destination}{}", field_suffix(.field))]
pub struct LookupGapError {
    /// The unmapped destination type.
    pub destination: DestinationType,
    /// The field being rendered, when known.
    pub field: Option<String>,
}

fn field_suffix(field: &Option<String>) -> String {
    field.as_ref().map(|f| format!(" (field {f})")).unwrap_or_default()
}

impl LookupGapError {
    /// Attach the field whose column could not be typed.
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// One entry per storable destination type. `REPLACE_ME` is absent on purpose.
static STORAGE_TYPES: &[(DestinationType, ColumnType)] = &[
    (DestinationType::Boolean, ColumnType::Boolean),
    (DestinationType::Date, ColumnType::Date),
    (DestinationType::DateTime, ColumnType::TimestampNtz(9)),
    (DestinationType::Float, ColumnType::Float),
    (DestinationType::Number, ColumnType::Number(38, 0)),
    (DestinationType::String, ColumnType::Varchar),
];

/// The full lookup table.
pub fn storage_types() -> &'static [(DestinationType, ColumnType)] {
    STORAGE_TYPES
}

/// Column type for a destination type; exact match only.
pub fn storage_type(destination: DestinationType) -> Result<ColumnType, LookupGapError> {
    STORAGE_TYPES
        .iter()
        .find(|(d, _)| *d == destination)
        .map(|(_, column)| *column)
        .ok_or(LookupGapError {
            destination,
            field: None,
        })
}
