//! Integration tests for Terraform rendering.

use chrono::{TimeZone, Utc};
use insta::assert_snapshot;
use sflow::classify::{DestinationType, SourceType};
use sflow::config::TerraformSettings;
use sflow::record::TypedFieldRecord;
use sflow::terraform::TerraformGenerator;

fn record(field: &str, source: SourceType, destination: DestinationType, label: &str) -> TypedFieldRecord {
    TypedFieldRecord {
        source_field: field.to_string(),
        source_datatype: source,
        destination_datatype: destination,
        salesforce_datatype: label.to_string(),
    }
}

fn account_records() -> Vec<TypedFieldRecord> {
    vec![
        record("Name", SourceType::String, DestinationType::String, "Name"),
        record("Amount__c", SourceType::Currency, DestinationType::Float, "Currency(18, 2)"),
        record("CloseDate", SourceType::Date, DestinationType::Date, "Date"),
    ]
}

#[test]
fn test_render_account() {
    let settings = TerraformSettings::default();
    let now = Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap();

    let hcl = TerraformGenerator::at(&settings, now)
        .render("Account", &account_records())
        .unwrap();
    assert_snapshot!("render_account", hcl);
}

#[test]
fn test_every_storable_type_gets_a_column() {
    let settings = TerraformSettings::default();
    let records = [
        record("IsActive", SourceType::Boolean, DestinationType::Boolean, "Checkbox"),
        record("Start__c", SourceType::Date, DestinationType::Date, "Date"),
        record("SystemModstamp", SourceType::DateTime, DestinationType::DateTime, "Date/Time"),
        record("Rate__c", SourceType::Precent, DestinationType::Float, "Percent(3, 2)"),
        record("Seats__c", SourceType::Number, DestinationType::Number, "Number(18, 0)"),
        record("Email__c", SourceType::Email, DestinationType::String, "Email"),
    ];

    let table = TerraformGenerator::new(&settings)
        .render_table("Contract", &records)
        .unwrap();
    let types: Vec<_> = table
        .lines()
        .filter_map(|line| line.trim().strip_prefix("type = "))
        .collect();
    assert_eq!(
        types,
        [
            "\"BOOLEAN\"",
            "\"DATE\"",
            "\"TIMESTAMP_NTZ(9)\"",
            "\"FLOAT\"",
            "\"NUMBER(38,0)\"",
            "\"VARCHAR\"",
        ]
    );
}

#[test]
fn test_empty_object_renders_both_resources() {
    let settings = TerraformSettings::default();
    let hcl = TerraformGenerator::new(&settings).render("Task", &[]).unwrap();

    assert!(hcl.contains("resource \"aws_appflow_flow\" \"salesforce_task\" {"));
    assert!(hcl.contains("    source_fields = [\n    ]\n    task_type = \"Filter\""));
    assert!(!hcl.contains("column {"));
}

#[test]
fn test_custom_settings_flow_through() {
    let settings = TerraformSettings {
        resource_prefix: "crm".to_string(),
        destination_database: "RAW".to_string(),
        destination_schema: "SFDC".to_string(),
        include_deleted_records: false,
        schedule_expression: "rate(6hours)".to_string(),
        ..Default::default()
    };

    let flow = TerraformGenerator::new(&settings).render_flow("Lead", &[]);
    assert!(flow.contains("resource \"aws_appflow_flow\" \"crm_lead\" {"));
    assert!(flow.contains("\"RAW.SFDC.LEAD\""));
    assert!(flow.contains("include_deleted_records = false"));
    assert!(flow.contains("schedule_expression = \"rate(6hours)\""));
}

#[test]
fn test_field_names_are_escaped() {
    let settings = TerraformSettings::default();
    let records = [record("Odd${x}", SourceType::String, DestinationType::String, "Text(10)")];

    let flow = TerraformGenerator::new(&settings).render_flow("Account", &records);
    assert!(flow.contains("source_fields     = [\"Odd$${x}\"]"));
}
