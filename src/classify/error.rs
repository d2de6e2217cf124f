//! Classification error types.

use thiserror::Error;

/// Result type for classification.
pub type ClassifyResult<T> = Result<T, ClassificationError>;

/// A native data type label that no rule recognizes.
///
/// Unknown labels are never defaulted: the rule table has to be extended so
/// new Salesforce field types get a deliberate mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// The label matched none of the rules.
    #[error("unknown data type {0:?}; add a rule for it before rerunning")]
    UnknownDataType(String),

    /// The label belongs to a field that could not be classified.
    #[error("unable to classify field {field} ({data_type:?}): {source}")]
    Field {
        /// Qualified API name of the offending field.
        field: String,
        /// Native label reported for the field.
        data_type: String,
        #[source]
        source: Box<ClassificationError>,
    },
}

impl ClassificationError {
    /// Attach the field that carried the unclassifiable label.
    pub fn for_field(self, field: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            data_type: data_type.into(),
            source: Box::new(self),
        }
    }

    /// The label that failed to classify.
    pub fn data_type(&self) -> &str {
        match self {
            Self::UnknownDataType(label) => label,
            Self::Field { data_type, .. } => data_type,
        }
    }
}
