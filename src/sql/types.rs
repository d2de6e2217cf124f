//! Snowflake column types for the destination table.
//!
//! This is distinct from [`DestinationType`](crate::classify::DestinationType),
//! which names a storage *category*; a `ColumnType` is the concrete type
//! expression written into the table definition.

use std::fmt;

/// Physical column type in the destination warehouse.
///
/// # Examples
///
/// ```
/// use sflow::sql::ColumnType;
///
/// assert_eq!(ColumnType::Number(38, 0).to_string(), "NUMBER(38,0)");
/// assert_eq!(ColumnType::TimestampNtz(9).to_string(), "TIMESTAMP_NTZ(9)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Boolean type.
    Boolean,

    /// Double-precision floating point.
    Float,

    /// Fixed-point number with precision and scale.
    Number(u8, u8),

    /// Variable-length string without an explicit length.
    Varchar,

    /// Date without time.
    Date,

    /// Timestamp without timezone, with fractional-second precision.
    TimestampNtz(u8),
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Boolean => write!(f, "BOOLEAN"),
            ColumnType::Float => write!(f, "FLOAT"),
            ColumnType::Number(p, s) => write!(f, "NUMBER({},{})", p, s),
            ColumnType::Varchar => write!(f, "VARCHAR"),
            ColumnType::Date => write!(f, "DATE"),
            ColumnType::TimestampNtz(p) => write!(f, "TIMESTAMP_NTZ({})", p),
        }
    }
}
