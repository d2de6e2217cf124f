//! Integration tests for the extraction and generation stages.
//!
//! A canned metadata provider stands in for Salesforce; CSVs go through a
//! temporary directory.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sflow::classify::{DestinationType, SourceType};
use sflow::config::TerraformSettings;
use sflow::metadata::{validate_object_name, MetadataProvider, MetadataResult};
use sflow::pipeline::{extract, generate};
use sflow::record::{read_csv_file, FieldDescriptor, FieldFilter, CSV_HEADER};
use sflow::Error;
use std::fs;
use tempfile::TempDir;

struct CannedProvider {
    fields: Vec<FieldDescriptor>,
}

impl CannedProvider {
    fn new(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(name, label)| FieldDescriptor::new(*name, *label))
                .collect(),
        }
    }
}

#[async_trait]
impl MetadataProvider for CannedProvider {
    async fn describe_fields(&self, object: &str) -> MetadataResult<Vec<FieldDescriptor>> {
        validate_object_name(object)?;
        Ok(self.fields.clone())
    }
}

fn opportunity() -> CannedProvider {
    CannedProvider::new(&[
        ("Id", "Lookup()"),
        ("Amount__c", "Currency(18, 2)"),
        ("Status__c", "Picklist"),
        ("LastViewedDate", "Date/Time"),
        ("CloseDate", "Date"),
    ])
}

#[tokio::test]
async fn test_extract_filters_and_classifies() {
    let records = extract(&opportunity(), "Opportunity", &FieldFilter::default(), None)
        .await
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.source_field.as_str()).collect();
    assert_eq!(names, ["Id", "Amount__c", "Status__c", "CloseDate"]);

    assert_eq!(records[1].source_datatype, SourceType::Currency);
    assert_eq!(records[1].destination_datatype, DestinationType::Float);
    assert_eq!(records[1].salesforce_datatype, "Currency(18, 2)");
    assert_eq!(records[2].source_datatype, SourceType::Picklist);
    assert_eq!(records[2].destination_datatype, DestinationType::String);
}

#[tokio::test]
async fn test_extract_writes_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Opportunity.csv");

    let records = extract(&opportunity(), "Opportunity", &FieldFilter::default(), Some(&path))
        .await
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER.join(",").as_str()));
    assert_eq!(lines.next(), Some("Id,REFERENCE,STRING,Lookup()"));
    assert_eq!(lines.next(), Some("Amount__c,CURRENCY,FLOAT,\"Currency(18, 2)\""));

    assert_eq!(read_csv_file(&path).unwrap(), records);
}

#[tokio::test]
async fn test_unknown_label_aborts_without_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Account.csv");
    let provider = CannedProvider::new(&[("Name", "Name"), ("Secret__c", "Encrypted Text(175)")]);

    let err = extract(&provider, "Account", &FieldFilter::default(), Some(&path))
        .await
        .unwrap_err();

    match err {
        Error::Classification(e) => assert_eq!(e.data_type(), "Encrypted Text(175)"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn test_invalid_object_name_is_rejected() {
    let err = extract(&opportunity(), "Account' OR '1'='1", &FieldFilter::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Metadata(_)));
}

#[tokio::test]
async fn test_extract_then_generate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Opportunity.csv");
    extract(&opportunity(), "Opportunity", &FieldFilter::default(), Some(&path))
        .await
        .unwrap();

    let settings = TerraformSettings::default();
    let now = Utc.with_ymd_and_hms(2024, 2, 28, 12, 0, 0).unwrap();
    let hcl = generate(&path, None, &settings, now).unwrap();

    assert!(hcl.contains("resource \"aws_appflow_flow\" \"salesforce_opportunity\" {"));
    assert!(hcl.contains("resource \"snowflake_table\" \"salesforce_opportunity\" {"));
    assert!(hcl.contains("object                   = \"STAGING.SALESFORCE.OPPORTUNITY\""));
    assert!(hcl.contains("schedule_start_time = \"2024-02-29T08:00:00Z\""));
    assert!(hcl.contains("    name = \"AMOUNT__C\"\n    type = \"FLOAT\"\n"));
    assert!(!hcl.contains("LASTVIEWEDDATE"));
}

#[test]
fn test_generate_with_explicit_object_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.v2.csv");
    fs::write(
        &path,
        "source_field,source_datatype,destination_datatype,salesforce_datatype\n\
         Active__c,boolean,boolean,Checkbox\n",
    )
    .unwrap();

    let settings = TerraformSettings::default();
    let hcl = generate(&path, Some("Invoice__c"), &settings, Utc::now()).unwrap();
    assert!(hcl.contains("\"salesforce_invoice__c\""));
    assert!(hcl.contains("type = \"BOOLEAN\""));

    let derived = generate(&path, None, &settings, Utc::now()).unwrap();
    assert!(derived.contains("\"salesforce_export\""));
}

#[test]
fn test_generate_rejects_unresolved_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Account.csv");
    fs::write(
        &path,
        "source_field,source_datatype,destination_datatype,salesforce_datatype\n\
         Name,STRING,STRING,Name\n\
         Total__c,REPLACE_ME,REPLACE_ME,Roll-Up Summary (SUM Opportunity)\n",
    )
    .unwrap();

    let err = generate(&path, None, &TerraformSettings::default(), Utc::now()).unwrap_err();
    match err {
        Error::LookupGap(gap) => {
            assert_eq!(gap.destination, DestinationType::ReplaceMe);
            assert_eq!(gap.field.as_deref(), Some("Total__c"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_generate_rejects_unknown_tokens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Account.csv");
    fs::write(
        &path,
        "source_field,source_datatype,destination_datatype,salesforce_datatype\n\
         Amount__c,CURRENCY,CURRENCY,Currency(18, 2)\n",
    )
    .unwrap();

    let err = generate(&path, None, &TerraformSettings::default(), Utc::now()).unwrap_err();
    assert!(matches!(err, Error::RecordIo(_)));
}

#[test]
fn test_generate_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = generate(
        &dir.path().join("Nope.csv"),
        None,
        &TerraformSettings::default(),
        Utc::now(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::RecordIo(_)));
}
