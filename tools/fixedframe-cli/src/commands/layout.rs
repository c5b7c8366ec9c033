//! Layout command implementation.

use std::path::Path;

use crate::commands::load_schema;
use crate::error::Result;
use crate::output::{format_layout_json, format_layout_table};
use crate::OutputFormat;

/// Print the offsets and lengths of every scalar field in a schema.
pub fn run(schema_path: &Path, format: OutputFormat) -> Result<()> {
    let schema = load_schema(schema_path)?;

    let rendered = match format {
        OutputFormat::Table => format_layout_table(&schema),
        OutputFormat::Json => format_layout_json(&schema)?,
    };
    println!("{rendered}");
    Ok(())
}
