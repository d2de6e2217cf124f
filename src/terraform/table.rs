//! `snowflake_table` resource emission.

use super::format::{quote_string, HclWriter};
use super::resource_name;
use crate::config::TerraformSettings;
use crate::sql::ColumnType;

/// A resolved destination column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Uppercased source field name.
    pub name: String,
    pub column_type: ColumnType,
}

pub(super) fn write_table(w: &mut HclWriter, settings: &TerraformSettings, object: &str, columns: &[TableColumn]) {
    let schema = &settings.snowflake_schema_resource;

    w.write_section_header("Snowflake Table");
    w.open_block(&format!(
        "resource \"snowflake_table\" {}",
        quote_string(&resource_name(settings, object))
    ));
    w.write_attribute("database", 8, &format!("{schema}.database"));
    w.write_attribute("name", 8, &quote_string(&object.to_uppercase()));
    w.write_attribute("schema", 8, &format!("{schema}.name"));

    for column in columns {
        w.blank_line();
        w.open_block("column");
        w.write_attribute("name", 0, &quote_string(&column.name));
        w.write_attribute("type", 0, &quote_string(&column.column_type.to_string()));
        w.close_block();
    }

    w.close_block();
}
