//! Integration tests for field type classification.
//!
//! These tests exercise the rule table through the public classifier
//! functions, the way the extraction stage uses them.

use sflow::classify::{
    classify, classify_destination, classify_source, matching_rule, rules, ClassificationError,
    DestinationType, SourceType, REPLACE_ME,
};

#[test]
fn test_every_rule_pattern_classifies() {
    for rule in rules() {
        let label = rule.pattern();
        assert!(classify_source(label).is_ok(), "source failed for {label}");
        assert!(classify_destination(label).is_ok(), "destination failed for {label}");
    }
}

#[test]
fn test_classifiers_agree_with_rule_table() {
    for rule in rules() {
        if let Some((source, destination)) = rule.mapped_types() {
            assert_eq!(classify(rule.pattern()).unwrap(), (source, destination), "{}", rule.name);
        }
    }
}

#[test]
fn test_unknown_labels_fail() {
    for label in ["Blob", "", "text", "Time", "Encrypted Text(175)"] {
        let err = classify_source(label).unwrap_err();
        assert_eq!(err, ClassificationError::UnknownDataType(label.to_string()));
        assert!(classify_destination(label).is_err());
    }
}

#[test]
fn test_currency_field() {
    assert_eq!(
        classify("Currency(18, 2)").unwrap(),
        (SourceType::Currency, DestinationType::Float)
    );
}

#[test]
fn test_picklist_field() {
    assert_eq!(
        classify("Picklist").unwrap(),
        (SourceType::Picklist, DestinationType::String)
    );
}

#[test]
fn test_multi_select_picklist_is_not_a_plain_picklist() {
    assert_eq!(
        classify("Picklist (Multi-Select)").unwrap(),
        (SourceType::MultiPicklist, DestinationType::String)
    );
    assert_eq!(matching_rule("Picklist (Multi-Select)").unwrap().name, "picklist_multi_select");
}

#[test]
fn test_percent_keeps_legacy_token() {
    assert_eq!(classify_source("Percent(3, 0)").unwrap().as_str(), "PRECENT");
    assert_eq!(classify_destination("Percent(3, 0)").unwrap(), DestinationType::Float);
}

#[test]
fn test_text_area_before_text() {
    assert_eq!(classify_source("Text Area(255)").unwrap(), SourceType::TextArea);
    assert_eq!(classify_source("Text(80)").unwrap(), SourceType::String);
    assert_eq!(classify_source("Long Text Area(32768)").unwrap(), SourceType::TextArea);
    assert_eq!(classify_source("Rich Text Area(32768)").unwrap(), SourceType::TextArea);
}

#[test]
fn test_lookups_are_references() {
    for label in ["Lookup(User)", "Master-Detail(Account)", "Hierarchy", "Record Type"] {
        assert_eq!(classify(label).unwrap(), (SourceType::Reference, DestinationType::String));
    }
}

#[test]
fn test_formula_matches_wrapped_type() {
    let wrapped: Vec<_> = rules()
        .iter()
        .filter(|rule| rule.mapped_types().is_some())
        .map(|rule| rule.pattern())
        .collect();
    assert!(wrapped.len() >= 20);

    for inner in wrapped {
        let formula = format!("Formula ({inner})");
        assert_eq!(classify_source(&formula).unwrap(), classify_source(inner).unwrap(), "{formula}");
        assert_eq!(
            classify_destination(&formula).unwrap(),
            classify_destination(inner).unwrap(),
            "{formula}"
        );
    }
}

#[test]
fn test_formula_with_unusable_inner_type_needs_review() {
    for label in ["Formula", "Formula ()", "Formula (Blob)", "Formula )Text("] {
        assert_eq!(classify_source(label).unwrap(), SourceType::ReplaceMe, "{label}");
        assert_eq!(classify_destination(label).unwrap(), DestinationType::ReplaceMe, "{label}");
    }
}

#[test]
fn test_roll_up_needs_review() {
    let (source, destination) = classify("Roll-Up Summary (SUM Opportunity)").unwrap();
    assert_eq!(source.as_str(), REPLACE_ME);
    assert_eq!(destination.as_str(), REPLACE_ME);
    assert!(source.needs_review());
    assert!(destination.needs_review());
}

#[test]
fn test_tokens_parse_case_insensitively() {
    assert_eq!("currency".parse::<SourceType>().unwrap(), SourceType::Currency);
    assert_eq!("DateTime".parse::<DestinationType>().unwrap(), DestinationType::DateTime);
    assert_eq!("replace_me".parse::<DestinationType>().unwrap(), DestinationType::ReplaceMe);
    assert!("TEXT".parse::<DestinationType>().is_err());
    assert!("CURRENCY".parse::<DestinationType>().is_err());
}

#[test]
fn test_build_records_for_known_fields() {
    use sflow::record::{build_records, FieldDescriptor, FieldFilter};

    let fields = [
        FieldDescriptor::new("Amount__c", "Currency(18, 2)"),
        FieldDescriptor::new("Status__c", "Picklist (Multi-Select)"),
        FieldDescriptor::new("UserRecordAccessId", "Lookup(User Record Access)"),
    ];

    let records = build_records(&fields, &FieldFilter::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].source_datatype, SourceType::Currency);
    assert_eq!(records[0].destination_datatype, DestinationType::Float);
    assert_eq!(records[1].source_field, "Status__c");
    assert_eq!(records[1].source_datatype, SourceType::MultiPicklist);
    assert_eq!(records[1].destination_datatype, DestinationType::String);
}
