//! Ordered rule table mapping Salesforce type labels to canonical types.
//!
//! Rules are evaluated top to bottom and the first match wins. Order matters
//! wherever one label is a prefix of another: `Picklist (Multi-Select)` has to
//! be tested before the generic `Picklist` prefix, and `Text Area` before
//! `Text`.
//!
//! Each rule yields both a [`SourceType`] and a [`DestinationType`]; the two
//! classifiers are projections of the same table so they can never disagree
//! about which rule fired.

use tracing::warn;

use super::error::{ClassificationError, ClassifyResult};
use super::types::{DestinationType, SourceType};

/// Formulas in Salesforce labels nest at most once; anything deeper is junk.
const MAX_FORMULA_DEPTH: usize = 4;

/// How a rule matches a native label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelMatcher {
    /// The whole label equals the pattern.
    Exact(&'static str),
    /// The label starts with the pattern.
    Prefix(&'static str),
}

impl LabelMatcher {
    fn matches(&self, label: &str) -> bool {
        match self {
            LabelMatcher::Exact(pattern) => label == *pattern,
            LabelMatcher::Prefix(pattern) => label.starts_with(pattern),
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            LabelMatcher::Exact(p) | LabelMatcher::Prefix(p) => p,
        }
    }
}

/// What a matching rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleOutcome {
    /// A fixed pair of canonical types.
    Mapped(SourceType, DestinationType),
    /// Reclassify the type named inside the label's parenthetical.
    Formula,
    /// Recognized, but needs a manual decision.
    ManualReview,
}

/// A single entry in the classification table.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    /// Rule identifier
    pub name: &'static str,
    matcher: LabelMatcher,
    outcome: RuleOutcome,
}

impl TypeRule {
    /// The label (or label prefix) this rule tests for.
    pub fn pattern(&self) -> &'static str {
        self.matcher.pattern()
    }

    /// True if the rule is a prefix match rather than an exact match.
    pub fn is_prefix(&self) -> bool {
        matches!(self.matcher, LabelMatcher::Prefix(_))
    }

    /// Fixed types produced by this rule, if it does not recurse or defer.
    pub fn mapped_types(&self) -> Option<(SourceType, DestinationType)> {
        match self.outcome {
            RuleOutcome::Mapped(source, destination) => Some((source, destination)),
            _ => None,
        }
    }
}

const fn exact(name: &'static str, label: &'static str, s: SourceType, d: DestinationType) -> TypeRule {
    TypeRule {
        name,
        matcher: LabelMatcher::Exact(label),
        outcome: RuleOutcome::Mapped(s, d),
    }
}

const fn prefix(name: &'static str, label: &'static str, s: SourceType, d: DestinationType) -> TypeRule {
    TypeRule {
        name,
        matcher: LabelMatcher::Prefix(label),
        outcome: RuleOutcome::Mapped(s, d),
    }
}

use DestinationType as D;
use SourceType as S;

static RULES: &[TypeRule] = &[
    exact("address", "Address", S::Address, D::String),
    prefix("auto_number", "Auto Number", S::String, D::String),
    exact("checkbox", "Checkbox", S::Boolean, D::Boolean),
    prefix("content", "Content", S::String, D::String),
    prefix("currency", "Currency", S::Currency, D::Float),
    exact("date", "Date", S::Date, D::Date),
    exact("date_time", "Date/Time", S::DateTime, D::DateTime),
    exact("email", "Email", S::Email, D::String),
    exact("external_lookup", "External Lookup", S::String, D::String),
    exact("fax", "Fax", S::Phone, D::String),
    TypeRule {
        name: "formula",
        matcher: LabelMatcher::Prefix("Formula"),
        outcome: RuleOutcome::Formula,
    },
    exact("geolocation", "Geolocation", S::Location, D::String),
    exact("hierarchy", "Hierarchy", S::Reference, D::String),
    prefix("long_text_area", "Long Text Area", S::TextArea, D::String),
    prefix("lookup", "Lookup", S::Reference, D::String),
    prefix("master_detail", "Master-Detail", S::Reference, D::String),
    exact("name", "Name", S::String, D::String),
    prefix("number", "Number", S::Number, D::Number),
    prefix("percent", "Percent", S::Precent, D::Float),
    exact("picklist_multi_select", "Picklist (Multi-Select)", S::MultiPicklist, D::String),
    prefix("picklist", "Picklist", S::Picklist, D::String),
    exact("phone", "Phone", S::Phone, D::String),
    exact("record_type", "Record Type", S::Reference, D::String),
    prefix("rich_text_area", "Rich Text Area", S::TextArea, D::String),
    TypeRule {
        name: "roll_up",
        matcher: LabelMatcher::Prefix("Roll-Up"),
        outcome: RuleOutcome::ManualReview,
    },
    prefix("text_area", "Text Area", S::TextArea, D::String),
    prefix("text", "Text", S::String, D::String),
    prefix("url", "URL", S::Url, D::String),
];

/// The classification table, in evaluation order.
pub fn rules() -> &'static [TypeRule] {
    RULES
}

/// First rule matching `label`, if any.
pub fn matching_rule(label: &str) -> Option<&'static TypeRule> {
    RULES.iter().find(|rule| rule.matcher.matches(label))
}

/// Map a native label to its canonical source type.
pub fn classify_source(label: &str) -> ClassifyResult<SourceType> {
    resolve(label, 0).map(|(source, _)| source)
}

/// Map a native label to its canonical destination type.
pub fn classify_destination(label: &str) -> ClassifyResult<DestinationType> {
    resolve(label, 0).map(|(_, destination)| destination)
}

/// Map a native label to both canonical types in one pass.
pub fn classify(label: &str) -> ClassifyResult<(SourceType, DestinationType)> {
    resolve(label, 0)
}

fn resolve(label: &str, depth: usize) -> ClassifyResult<(SourceType, DestinationType)> {
    let rule = matching_rule(label)
        .ok_or_else(|| ClassificationError::UnknownDataType(label.to_string()))?;

    match rule.outcome {
        RuleOutcome::Mapped(source, destination) => Ok((source, destination)),
        RuleOutcome::ManualReview => {
            warn!(label, rule = rule.name, "type needs manual review");
            Ok((SourceType::ReplaceMe, DestinationType::ReplaceMe))
        }
        RuleOutcome::Formula => Ok(unwrap_formula(label, depth)),
    }
}

/// Classify the return type of a formula field.
///
/// Any failure while unwrapping degrades to `REPLACE_ME` instead of aborting
/// the run; the formula itself is a recognized type.
fn unwrap_formula(label: &str, depth: usize) -> (SourceType, DestinationType) {
    const REVIEW: (SourceType, DestinationType) = (SourceType::ReplaceMe, DestinationType::ReplaceMe);

    if depth >= MAX_FORMULA_DEPTH {
        warn!(label, depth, "formula nesting too deep");
        return REVIEW;
    }

    let Some(inner) = formula_return_type(label) else {
        warn!(label, "formula without a return type");
        return REVIEW;
    };

    match resolve(inner, depth + 1) {
        Ok(types) => types,
        Err(err) => {
            warn!(label, error = %err, "formula return type not recognized");
            REVIEW
        }
    }
}

/// Text inside the trailing parenthetical: from the first `(` to the last `)`.
fn formula_return_type(label: &str) -> Option<&str> {
    let open = label.find('(')?;
    let close = label.rfind(')')?;
    if close <= open + 1 {
        return None;
    }
    Some(&label[open + 1..close])
}
