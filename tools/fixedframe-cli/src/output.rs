//! Output formatting utilities.

use fixedframe_core::Schema;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::Result;

/// One scalar field of a layout table.
#[derive(Tabled)]
pub struct LayoutRow {
    #[tabled(rename = "Field")]
    pub path: String,
    #[tabled(rename = "Offset")]
    pub offset: usize,
    #[tabled(rename = "Length")]
    pub length: usize,
    #[tabled(rename = "Type")]
    pub value_type: String,
}

/// Format a schema's layout as a pretty table.
pub fn format_layout_table(schema: &Schema) -> String {
    let rows: Vec<LayoutRow> = schema
        .layout()
        .into_iter()
        .map(|f| LayoutRow {
            path: f.path,
            offset: f.offset,
            length: f.length,
            value_type: f.value_type.to_string(),
        })
        .collect();

    if rows.is_empty() {
        return format!("{} (no fields)", schema.name());
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{table}\n{} ({} bytes)", schema.name(), schema.encoded_len())
}

/// Format a schema's layout as JSON.
pub fn format_layout_json(schema: &Schema) -> Result<String> {
    let fields: Vec<serde_json::Value> = schema
        .layout()
        .into_iter()
        .map(|f| {
            json!({
                "path": f.path,
                "offset": f.offset,
                "length": f.length,
                "type": f.value_type,
            })
        })
        .collect();

    let layout = json!({
        "record": schema.name(),
        "length": schema.encoded_len(),
        "fields": fields,
    });
    Ok(serde_json::to_string_pretty(&layout)?)
}

/// Format converted records as pretty JSON with a trailing newline.
pub fn format_json(value: &serde_json::Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
