//! MetadataProvider trait definition.
//!
//! The trait abstracts over the source of field metadata. The primary
//! implementation queries Salesforce; tests substitute canned descriptors.

use async_trait::async_trait;
use tracing::info;

use super::error::{MetadataError, MetadataResult};
use crate::classify::ClassificationError;
use crate::record::{build_records, FieldDescriptor, FieldFilter, TypedFieldRecord};

/// Trait for fetching the fields of a business object.
///
/// # Example
///
/// ```ignore
/// use sflow::metadata::MetadataProvider;
///
/// async fn example(provider: &impl MetadataProvider) -> MetadataResult<()> {
///     let fields = provider.describe_fields("Opportunity").await?;
///     println!("{} fields", fields.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// List every field of `object`, in the order the source reports them.
    async fn describe_fields(&self, object: &str) -> MetadataResult<Vec<FieldDescriptor>>;
}

/// Errors from the combined fetch-and-classify step.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

/// Extension trait with the extraction pipeline on top of any provider.
#[async_trait]
pub trait MetadataProviderExt: MetadataProvider {
    /// Fetch the fields of `object` and classify the ones `filter` keeps.
    async fn extract_records(
        &self,
        object: &str,
        filter: &FieldFilter,
    ) -> Result<Vec<TypedFieldRecord>, ExtractError> {
        let fields = self.describe_fields(object).await?;
        info!(object, fields = fields.len(), "fetched field metadata");

        Ok(build_records(&fields, filter)?)
    }
}

// Blanket implementation for all MetadataProvider implementations
impl<T: MetadataProvider> MetadataProviderExt for T {}

/// Reject object names that are not plain API identifiers.
///
/// The name is interpolated into a SOQL string literal, so anything beyond
/// `[A-Za-z0-9_]` is refused outright.
pub fn validate_object_name(object: &str) -> MetadataResult<()> {
    let valid = object
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && object.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(MetadataError::InvalidObjectName(object.to_string()))
    }
}
