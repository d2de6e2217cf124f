//! Terraform generation from typed field records.
//!
//! Renders two resources for one Salesforce object:
//!
//! ```text
//! TypedFieldRecord[] ──► aws_appflow_flow   (Map task per field, Filter
//!                    │                       projection, daily trigger)
//!                    └─► snowflake_table     (column per field, type from
//!                                            the storage lookup)
//! ```
//!
//! Column types are resolved before anything is written, so a field still
//! marked `REPLACE_ME` fails the whole render instead of producing a partial
//! file.
//!
//! # Example
//!
//! ```
//! use sflow::config::TerraformSettings;
//! use sflow::terraform::TerraformGenerator;
//!
//! let settings = TerraformSettings::default();
//! let hcl = TerraformGenerator::new(&settings).render("Account", &[]).unwrap();
//! assert!(hcl.contains("resource \"snowflake_table\" \"salesforce_account\""));
//! ```

mod flow;
mod format;
mod table;

pub use format::{escape_hcl_string, quote_string, HclWriter};
pub use table::TableColumn;

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::TerraformSettings;
use crate::record::TypedFieldRecord;
use crate::sql::{storage_type, LookupGapError};

/// Renders the flow and table resources for one object.
pub struct TerraformGenerator<'a> {
    settings: &'a TerraformSettings,
    now: DateTime<Utc>,
}

impl<'a> TerraformGenerator<'a> {
    /// Generator whose schedule starts tomorrow, relative to the current time.
    pub fn new(settings: &'a TerraformSettings) -> Self {
        Self::at(settings, Utc::now())
    }

    /// Generator with a fixed notion of "now", for reproducible output.
    pub fn at(settings: &'a TerraformSettings, now: DateTime<Utc>) -> Self {
        Self { settings, now }
    }

    /// The `schedule_start_time` value: tomorrow at the configured UTC hour.
    pub fn schedule_start_time(&self) -> String {
        let tomorrow = self.now + Duration::days(1);
        format!(
            "{}T{:02}:00:00Z",
            tomorrow.format("%Y-%m-%d"),
            self.settings.schedule_start_hour
        )
    }

    /// Resolve the destination column for every record.
    pub fn columns(&self, records: &[TypedFieldRecord]) -> Result<Vec<TableColumn>, LookupGapError> {
        records
            .iter()
            .map(|record| {
                storage_type(record.destination_datatype)
                    .map(|column_type| TableColumn {
                        name: record.source_field.to_uppercase(),
                        column_type,
                    })
                    .map_err(|e| e.for_field(&record.source_field))
            })
            .collect()
    }

    /// Render both resources.
    pub fn render(&self, object: &str, records: &[TypedFieldRecord]) -> Result<String, LookupGapError> {
        let columns = self.columns(records)?;
        let start = self.schedule_start_time();
        debug!(object, fields = records.len(), %start, "rendering terraform");

        let mut w = HclWriter::new();
        flow::write_flow(&mut w, self.settings, object, records, &start);
        w.blank_line();
        table::write_table(&mut w, self.settings, object, &columns);
        Ok(w.into_string())
    }

    /// Render only the `aws_appflow_flow` resource.
    pub fn render_flow(&self, object: &str, records: &[TypedFieldRecord]) -> String {
        let mut w = HclWriter::new();
        flow::write_flow(&mut w, self.settings, object, records, &self.schedule_start_time());
        w.into_string()
    }

    /// Render only the `snowflake_table` resource.
    pub fn render_table(&self, object: &str, records: &[TypedFieldRecord]) -> Result<String, LookupGapError> {
        let columns = self.columns(records)?;
        let mut w = HclWriter::new();
        table::write_table(&mut w, self.settings, object, &columns);
        Ok(w.into_string())
    }
}

/// Terraform resource name for an object, e.g. `salesforce_account`.
pub fn resource_name(settings: &TerraformSettings, object: &str) -> String {
    format!("{}_{}", settings.resource_prefix, object.to_lowercase())
}

/// Object name encoded in a CSV path: the file name up to its first `.`.
///
/// `out/Account.csv` gives `Account`. Returns `None` when nothing precedes
/// the first dot.
pub fn object_name_from_path(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let object = file_name.split('.').next()?;
    if object.is_empty() {
        None
    } else {
        Some(object.to_string())
    }
}
