//! Exclusion policy for fields that never reach the classifier.

use std::collections::HashSet;

use super::FieldDescriptor;

/// System fields present on most objects that carry no business data.
pub const DEFAULT_IGNORED_FIELDS: &[&str] = &["LastReferencedDate", "LastViewedDate", "UserRecordAccessId"];

/// Decides which fields are dropped before classification.
///
/// Filtering runs first so a field with an unsupported type that nobody wants
/// cannot abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    ignored_fields: HashSet<String>,
    ignored_datatypes: HashSet<String>,
}

impl FieldFilter {
    /// Filter with explicit exclusion sets.
    pub fn new<F, T>(ignored_fields: F, ignored_datatypes: T) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            ignored_fields: ignored_fields.into_iter().map(Into::into).collect(),
            ignored_datatypes: ignored_datatypes.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a qualified name to the exclusion set.
    pub fn ignore_field(mut self, name: impl Into<String>) -> Self {
        self.ignored_fields.insert(name.into());
        self
    }

    /// Add a native type label to the exclusion set.
    pub fn ignore_datatype(mut self, label: impl Into<String>) -> Self {
        self.ignored_datatypes.insert(label.into());
        self
    }

    /// True if the field is excluded by name or by native type.
    pub fn is_ignored(&self, field: &FieldDescriptor) -> bool {
        self.ignored_fields.contains(&field.qualified_name)
            || self.ignored_datatypes.contains(&field.native_data_type)
    }
}

impl Default for FieldFilter {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED_FIELDS.iter().copied(), Vec::<String>::new())
    }
}
