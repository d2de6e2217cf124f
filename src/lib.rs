//! # sflow
//!
//! Turns a Salesforce object's field metadata into an AWS AppFlow flow and a
//! Snowflake table, by way of an intermediate CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Salesforce FieldDefinition query              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  FieldDescriptor[]                       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [record::FieldFilter + classify]
//! ┌─────────────────────────────────────────────────────────┐
//! │     TypedFieldRecord[]  (source type, destination type)  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [record CSV]
//! ┌─────────────────────────────────────────────────────────┐
//! │                     <OBJECT>.csv                         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql storage lookup + terraform]
//! ┌─────────────────────────────────────────────────────────┐
//! │        aws_appflow_flow  +  snowflake_table (HCL)        │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod record;
pub mod sql;
pub mod terraform;

pub use error::{Error, Result};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::classify::{classify_destination, classify_source, DestinationType, SourceType, REPLACE_ME};
    pub use crate::config::{Settings, TerraformSettings};
    pub use crate::metadata::{MetadataProvider, MetadataProviderExt, SalesforceMetadataProvider};
    pub use crate::record::{build_records, FieldDescriptor, FieldFilter, TypedFieldRecord};
    pub use crate::sql::{storage_type, ColumnType};
    pub use crate::terraform::TerraformGenerator;
}
