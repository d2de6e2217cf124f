//! The two pipeline stages, as called by the binaries.
//!
//! ```text
//! extract:  MetadataProvider ──► TypedFieldRecord[] ──► <OBJECT>.csv
//! generate: <OBJECT>.csv ──► TypedFieldRecord[] ──► Terraform text
//! ```
//!
//! Neither stage produces partial output: the CSV is written only after every
//! field classified, and the Terraform text is returned only once fully
//! rendered.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::config::TerraformSettings;
use crate::error::{Error, Result};
use crate::metadata::{MetadataProvider, MetadataProviderExt};
use crate::record::{read_csv_file, write_csv_file, FieldFilter, TypedFieldRecord};
use crate::terraform::{object_name_from_path, TerraformGenerator};

/// Fetch and classify the fields of `object`, writing them to `csv_path` if
/// one is given.
pub async fn extract<P: MetadataProvider>(
    provider: &P,
    object: &str,
    filter: &FieldFilter,
    csv_path: Option<&Path>,
) -> Result<Vec<TypedFieldRecord>> {
    let records = provider.extract_records(object, filter).await?;

    for record in records.iter().filter(|r| r.needs_review()) {
        warn!(
            field = %record.source_field,
            label = %record.salesforce_datatype,
            "field needs a manual type decision; edit the CSV before generating"
        );
    }

    if let Some(path) = csv_path {
        write_csv_file(path, &records)?;
    }

    Ok(records)
}

/// Read a CSV and render its Terraform.
///
/// The object name defaults to the CSV file name up to its first `.`.
pub fn generate(
    csv_path: &Path,
    object: Option<&str>,
    settings: &TerraformSettings,
    now: DateTime<Utc>,
) -> Result<String> {
    let object = match object {
        Some(name) => name.to_string(),
        None => object_name_from_path(csv_path).ok_or_else(|| Error::ObjectName(csv_path.to_path_buf()))?,
    };

    let records = read_csv_file(csv_path)?;
    Ok(TerraformGenerator::at(settings, now).render(&object, &records)?)
}

/// Fixed-width listing of records, one per line.
pub fn format_record_table(records: &[TypedFieldRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{:<50}{:<20}{:<20}{:<20}",
            record.source_field,
            record.source_datatype.as_str(),
            record.destination_datatype.as_str(),
            record.salesforce_datatype
        );
    }
    out
}
