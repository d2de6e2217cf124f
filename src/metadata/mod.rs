//! Metadata provider module.
//!
//! Fetches the field list of a Salesforce object and hands it to the
//! classification pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MetadataProvider                           │
//! │  describe_fields(object) ──► Vec<FieldDescriptor>               │
//! │                                                                 │
//! │  MetadataProviderExt (blanket)                                  │
//! │  extract_records(object, filter) ──► Vec<TypedFieldRecord>      │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 SalesforceMetadataProvider                      │
//! │        (SOAP login + REST query on FieldDefinition)             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sflow::metadata::{MetadataProviderExt, SalesforceCredentials, SalesforceMetadataProvider};
//! use sflow::record::FieldFilter;
//!
//! let credentials = SalesforceCredentials::new("ops@acme.com", "password", "token");
//! let provider = SalesforceMetadataProvider::new(credentials)?;
//! let records = provider.extract_records("Opportunity", &FieldFilter::default()).await?;
//! ```

mod error;
mod provider;
mod salesforce;

pub use error::{MetadataError, MetadataResult};
pub use provider::{validate_object_name, ExtractError, MetadataProvider, MetadataProviderExt};
pub use salesforce::{
    field_definition_query, SalesforceCredentials, SalesforceMetadataProvider, DEFAULT_API_VERSION,
    DEFAULT_LOGIN_URL,
};
