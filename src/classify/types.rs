//! Canonical type vocabularies produced by the classifiers.
//!
//! Two vocabularies exist side by side:
//!
//! - [`SourceType`] describes what a Salesforce field *means* (an email, a
//!   lookup to another record, a percentage).
//! - [`DestinationType`] describes how the value is *stored* downstream, so
//!   many source concepts collapse to `STRING`.
//!
//! Both carry a `REPLACE_ME` sentinel for fields the rule table recognizes but
//! cannot type on its own (roll-up summaries, malformed formulas). The sentinel
//! is a value, not an error: it flows into the CSV so an operator can fix it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Token written for fields that need a manual type decision.
pub const REPLACE_ME: &str = "REPLACE_ME";

/// Error returned when a string is not a canonical token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {vocabulary} token: {token:?}")]
pub struct ParseTokenError {
    /// Which vocabulary was being parsed ("source type", "destination type").
    pub vocabulary: &'static str,
    /// The rejected input.
    pub token: String,
}

/// Canonical intermediate type describing source semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceType {
    Address,
    String,
    Boolean,
    Currency,
    Date,
    DateTime,
    Email,
    Phone,
    Location,
    Reference,
    TextArea,
    Number,
    /// Percent fields. The token is spelled `PRECENT` in every artifact this
    /// tool has ever produced, and downstream mappings key on that spelling.
    Precent,
    Picklist,
    MultiPicklist,
    Url,
    ReplaceMe,
}

impl SourceType {
    /// Every variant, in declaration order.
    pub const ALL: [SourceType; 17] = [
        SourceType::Address,
        SourceType::String,
        SourceType::Boolean,
        SourceType::Currency,
        SourceType::Date,
        SourceType::DateTime,
        SourceType::Email,
        SourceType::Phone,
        SourceType::Location,
        SourceType::Reference,
        SourceType::TextArea,
        SourceType::Number,
        SourceType::Precent,
        SourceType::Picklist,
        SourceType::MultiPicklist,
        SourceType::Url,
        SourceType::ReplaceMe,
    ];

    /// The canonical token as written to CSV and Terraform.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Address => "ADDRESS",
            SourceType::String => "STRING",
            SourceType::Boolean => "BOOLEAN",
            SourceType::Currency => "CURRENCY",
            SourceType::Date => "DATE",
            SourceType::DateTime => "DATETIME",
            SourceType::Email => "EMAIL",
            SourceType::Phone => "PHONE",
            SourceType::Location => "LOCATION",
            SourceType::Reference => "REFERENCE",
            SourceType::TextArea => "TEXTAREA",
            SourceType::Number => "NUMBER",
            SourceType::Precent => "PRECENT",
            SourceType::Picklist => "PICKLIST",
            SourceType::MultiPicklist => "MULTIPICKLIST",
            SourceType::Url => "URL",
            SourceType::ReplaceMe => REPLACE_ME,
        }
    }

    /// Returns true for the manual-review sentinel.
    pub fn needs_review(&self) -> bool {
        matches!(self, SourceType::ReplaceMe)
    }
}

/// Canonical storage-facing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DestinationType {
    Boolean,
    String,
    Float,
    Date,
    DateTime,
    Number,
    ReplaceMe,
}

impl DestinationType {
    /// Every variant, in declaration order.
    pub const ALL: [DestinationType; 7] = [
        DestinationType::Boolean,
        DestinationType::String,
        DestinationType::Float,
        DestinationType::Date,
        DestinationType::DateTime,
        DestinationType::Number,
        DestinationType::ReplaceMe,
    ];

    /// The canonical token as written to CSV and Terraform.
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Boolean => "BOOLEAN",
            DestinationType::String => "STRING",
            DestinationType::Float => "FLOAT",
            DestinationType::Date => "DATE",
            DestinationType::DateTime => "DATETIME",
            DestinationType::Number => "NUMBER",
            DestinationType::ReplaceMe => REPLACE_ME,
        }
    }

    /// Returns true for the manual-review sentinel.
    pub fn needs_review(&self) -> bool {
        matches!(self, DestinationType::ReplaceMe)
    }
}

// Tokens are matched case-insensitively; hand-edited CSVs are common.
impl FromStr for SourceType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        SourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| ParseTokenError {
                vocabulary: "source type",
                token: s.to_string(),
            })
    }
}

impl FromStr for DestinationType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        DestinationType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| ParseTokenError {
                vocabulary: "destination type",
                token: s.to_string(),
            })
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SourceType {
    type Error = ParseTokenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for DestinationType {
    type Error = ParseTokenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SourceType> for String {
    fn from(t: SourceType) -> Self {
        t.as_str().to_string()
    }
}

impl From<DestinationType> for String {
    fn from(t: DestinationType) -> Self {
        t.as_str().to_string()
    }
}
