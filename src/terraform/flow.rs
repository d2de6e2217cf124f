//! `aws_appflow_flow` resource emission.

use super::format::{quote_string, HclWriter};
use super::resource_name;
use crate::config::TerraformSettings;
use crate::record::TypedFieldRecord;

/// Emit the flow resource: connector config, one `Map` task per field, the
/// projection task, and the scheduled trigger.
pub(super) fn write_flow(
    w: &mut HclWriter,
    settings: &TerraformSettings,
    object: &str,
    records: &[TypedFieldRecord],
    schedule_start_time: &str,
) {
    let name = resource_name(settings, object);

    w.write_section_header("AppFlow Flow");
    w.open_block(&format!("resource \"aws_appflow_flow\" {}", quote_string(&name)));
    w.write_attribute("name", 0, &quote_string(&name));
    w.blank_line();

    write_source_config(w, settings, object);
    w.blank_line();
    write_destination_config(w, settings, object);

    for record in records {
        w.blank_line();
        write_map_task(w, record);
    }

    w.blank_line();
    write_projection_task(w, records);
    w.blank_line();
    write_trigger(w, settings, schedule_start_time);
    w.close_block();
}

fn write_source_config(w: &mut HclWriter, settings: &TerraformSettings, object: &str) {
    let profile = &settings.source_connector_profile;

    w.open_block("source_flow_config");
    w.write_attribute("connector_profile_name", 22, &format!("{profile}.name"));
    w.write_attribute("connector_type", 22, &format!("{profile}.connector_type"));
    w.blank_line();

    w.open_block("incremental_pull_config");
    w.write_attribute("datetime_type_field_name", 0, &quote_string(&settings.incremental_field));
    w.close_block();
    w.blank_line();

    w.open_block("source_connector_properties");
    w.open_block("salesforce");
    w.write_attribute("object", 23, &quote_string(object));
    w.write_attribute("include_deleted_records", 23, &settings.include_deleted_records.to_string());
    w.close_block();
    w.close_block();
    w.close_block();
}

fn write_destination_config(w: &mut HclWriter, settings: &TerraformSettings, object: &str) {
    let profile = &settings.destination_connector_profile;
    let stage = &settings.stage_object;
    let target = format!(
        "{}.{}.{}",
        settings.destination_database,
        settings.destination_schema,
        object.to_uppercase()
    );

    w.open_block("destination_flow_config");
    w.write_attribute("connector_profile_name", 22, &format!("{profile}.name"));
    w.write_attribute("connector_type", 22, &format!("{profile}.connector_type"));
    w.blank_line();

    w.open_block("destination_connector_properties");
    w.open_block("snowflake");
    w.write_attribute("bucket_prefix", 24, &format!("{stage}.key"));
    w.write_attribute("intermediate_bucket_name", 24, &format!("{stage}.bucket"));
    // A literal name; the provider mangles the table's qualified_name reference.
    w.write_attribute("object", 24, &quote_string(&target));
    w.blank_line();

    w.open_block("error_handling_config");
    w.write_attribute(
        "fail_on_first_destination_error",
        0,
        &settings.fail_on_first_destination_error.to_string(),
    );
    w.close_block();
    w.close_block();
    w.close_block();
    w.close_block();
}

fn write_map_task(w: &mut HclWriter, record: &TypedFieldRecord) {
    w.open_block("task");
    w.write_attribute("destination_field", 17, &quote_string(&record.source_field.to_uppercase()));
    w.write_attribute("source_fields", 17, &format!("[{}]", quote_string(&record.source_field)));
    w.write_attribute("task_type", 17, &quote_string("Map"));
    w.blank_line();

    w.write_line("task_properties = {");
    w.indent();
    w.write_attribute(
        "\"DESTINATION_DATA_TYPE\"",
        23,
        &quote_string(record.destination_datatype.as_str()),
    );
    w.write_attribute("\"SOURCE_DATA_TYPE\"", 23, &quote_string(record.source_datatype.as_str()));
    w.dedent();
    w.write_line("}");
    w.blank_line();

    w.open_block("connector_operator");
    w.write_attribute("salesforce", 0, &quote_string("NO_OP"));
    w.close_block();
    w.close_block();
}

fn write_projection_task(w: &mut HclWriter, records: &[TypedFieldRecord]) {
    w.open_block("task");
    w.write_line("source_fields = [");
    w.indent();
    for record in records {
        w.write_line(&format!("{},", quote_string(&record.source_field)));
    }
    w.dedent();
    w.write_line("]");
    w.write_attribute("task_type", 0, &quote_string("Filter"));
    w.blank_line();

    w.open_block("connector_operator");
    w.write_attribute("salesforce", 0, &quote_string("PROJECTION"));
    w.close_block();
    w.close_block();
}

fn write_trigger(w: &mut HclWriter, settings: &TerraformSettings, schedule_start_time: &str) {
    w.open_block("trigger_config");
    w.write_attribute("trigger_type", 0, &quote_string("Scheduled"));
    w.blank_line();

    w.open_block("trigger_properties");
    w.open_block("scheduled");
    w.write_attribute("data_pull_mode", 19, &quote_string("Incremental"));
    w.write_attribute("schedule_expression", 19, &quote_string(&settings.schedule_expression));
    w.write_attribute("schedule_start_time", 19, &quote_string(schedule_start_time));
    w.close_block();
    w.close_block();
    w.close_block();
}
