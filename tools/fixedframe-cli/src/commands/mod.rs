//! Command implementations.

pub mod codec;
pub mod layout;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use fixedframe_core::{RecordDescription, Schema};
use tracing::debug;

use crate::error::{CliError, Result};

/// Load a schema description file and build its schema.
pub fn load_schema(path: &Path) -> Result<Arc<Schema>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }

    let schema = RecordDescription::load(path)?.into_schema()?;
    debug!(
        path = %path.display(),
        record = schema.name(),
        length = schema.encoded_len(),
        "loaded schema"
    );
    Ok(Arc::new(schema))
}

/// Read the whole input file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.to_path_buf()));
            }
            Ok(fs::read(path)?)
        }
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write bytes to the output file, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => fs::write(path, bytes)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Parse a JSON object or an array of objects.
///
/// Returns the records and whether the input was a single object.
pub fn parse_json_records(bytes: &[u8]) -> Result<(Vec<serde_json::Value>, bool)> {
    match serde_json::from_slice(bytes)? {
        serde_json::Value::Array(values) => Ok((values, false)),
        value @ serde_json::Value::Object(_) => Ok((vec![value], true)),
        other => Err(CliError::InvalidInput(format!(
            "expected a JSON object or array of objects, got {other}"
        ))),
    }
}
