//! Salesforce data type classification.
//!
//! Maps native field type labels (as reported by `FieldDefinition.DataType`)
//! onto two canonical vocabularies:
//!
//! ```text
//! "Currency(18, 2)"          ──► CURRENCY   ──► FLOAT
//! "Picklist (Multi-Select)"  ──► MULTIPICKLIST ──► STRING
//! "Formula (Date)"           ──► (recurse on "Date") ──► DATE / DATE
//! "Roll-Up Summary (SUM …)"  ──► REPLACE_ME / REPLACE_ME
//! "Hologram"                 ──► ClassificationError
//! ```
//!
//! # Example
//!
//! ```
//! use sflow::classify::{classify_destination, classify_source, DestinationType, SourceType};
//!
//! assert_eq!(classify_source("Currency(18, 2)").unwrap(), SourceType::Currency);
//! assert_eq!(classify_destination("Currency(18, 2)").unwrap(), DestinationType::Float);
//! assert!(classify_source("Hologram").is_err());
//! ```

mod error;
mod rules;
mod types;

pub use error::{ClassificationError, ClassifyResult};
pub use rules::{classify, classify_destination, classify_source, matching_rule, rules, TypeRule};
pub use types::{DestinationType, ParseTokenError, SourceType, REPLACE_ME};
