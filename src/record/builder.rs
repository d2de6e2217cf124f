//! Turns provider output into typed records.

use tracing::{debug, info};

use super::{FieldDescriptor, FieldFilter, TypedFieldRecord};
use crate::classify::{self, ClassifyResult};

/// Classify every non-ignored descriptor, preserving input order.
///
/// The first unrecognized label aborts the whole batch; the error names the
/// field that carried it.
pub fn build_records<'a, I>(descriptors: I, filter: &FieldFilter) -> ClassifyResult<Vec<TypedFieldRecord>>
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for field in descriptors {
        if filter.is_ignored(field) {
            debug!(field = %field.qualified_name, "ignoring field");
            skipped += 1;
            continue;
        }

        let (source, destination) = classify::classify(&field.native_data_type)
            .map_err(|e| e.for_field(&field.qualified_name, &field.native_data_type))?;

        debug!(
            field = %field.qualified_name,
            label = %field.native_data_type,
            %source,
            %destination,
            "classified field"
        );

        records.push(TypedFieldRecord {
            source_field: field.qualified_name.clone(),
            source_datatype: source,
            destination_datatype: destination,
            salesforce_datatype: field.native_data_type.clone(),
        });
    }

    info!(records = records.len(), skipped, "classified fields");
    Ok(records)
}
