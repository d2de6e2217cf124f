//! Field descriptors and typed field records.
//!
//! ```text
//! FieldDescriptor ──► [FieldFilter] ──► [classify] ──► TypedFieldRecord ──► CSV
//! ```

mod builder;
mod csv_io;
mod filter;

pub use csv_io::{read_csv_file, read_records, write_csv_file, write_records, RecordIoError, CSV_HEADER};
pub use builder::build_records;
pub use filter::{FieldFilter, DEFAULT_IGNORED_FIELDS};

use serde::{Deserialize, Serialize};

use crate::classify::{DestinationType, SourceType};

/// One field as reported by the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Qualified API name, unique within its object (e.g. `Amount__c`).
    pub qualified_name: String,
    /// Native type label (e.g. `Picklist (Multi-Select)`).
    pub native_data_type: String,
}

impl FieldDescriptor {
    pub fn new(qualified_name: impl Into<String>, native_data_type: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            native_data_type: native_data_type.into(),
        }
    }
}

/// A classified field, one row of the intermediate CSV.
///
/// Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedFieldRecord {
    pub source_field: String,
    pub source_datatype: SourceType,
    pub destination_datatype: DestinationType,
    /// The original label, kept for traceability.
    pub salesforce_datatype: String,
}

impl TypedFieldRecord {
    /// True if either canonical type is the `REPLACE_ME` sentinel.
    pub fn needs_review(&self) -> bool {
        self.source_datatype.needs_review() || self.destination_datatype.needs_review()
    }
}
