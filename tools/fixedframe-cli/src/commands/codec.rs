//! Encode, decode and normalize command implementations.

use std::path::Path;
use std::sync::Arc;

use fixedframe_core::{codec, DynamicRecord, Schema};
use tracing::{debug, info};

use crate::commands::{load_schema, parse_json_records, read_input, write_output};
use crate::convert::{record_from_json, record_to_json};
use crate::error::{CliError, Result};
use crate::output::format_json;

/// Options for the decode command.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Byte offset of the first record.
    pub offset: usize,
    /// Maximum number of records to decode.
    pub count: Option<usize>,
    /// Skip `\n` and `\r\n` between records.
    pub lines: bool,
    /// Strip trailing padding from text fields.
    pub trim: bool,
}

/// Encode JSON records to concatenated fixed-width records.
pub fn encode(
    schema_path: &Path,
    input: Option<&Path>,
    output: Option<&Path>,
    lines: bool,
) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let (values, _) = parse_json_records(&read_input(input)?)?;
    let buf = encode_values(&schema, &values, lines)?;
    info!(records = values.len(), bytes = buf.len(), "encoded records");
    write_output(output, &buf)
}

fn encode_values(
    schema: &Arc<Schema>,
    values: &[serde_json::Value],
    lines: bool,
) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(values.len() * (schema.encoded_len() + usize::from(lines)));
    for (index, value) in values.iter().enumerate() {
        let record = record_from_json(schema, value)?;
        codec::encode_to(&record, &mut buf).map_err(|source| CliError::Record { index, source })?;
        if lines {
            buf.push(b'\n');
        }
    }
    Ok(buf)
}

/// Decode fixed-width records to a JSON array.
pub fn decode(
    schema_path: &Path,
    input: Option<&Path>,
    output: Option<&Path>,
    options: &DecodeOptions,
) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let bytes = read_input(input)?;
    let records = decode_values(&schema, &bytes, options)?;
    info!(records = records.len(), "decoded records");
    let json = format_json(&serde_json::Value::Array(records))?;
    write_output(output, json.as_bytes())
}

fn decode_values(
    schema: &Arc<Schema>,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<Vec<serde_json::Value>> {
    let record_len = schema.encoded_len();
    if record_len == 0 {
        return Err(CliError::InvalidInput(format!(
            "record {} has no fields to decode",
            schema.name()
        )));
    }
    if options.offset > bytes.len() {
        return Err(CliError::InvalidInput(format!(
            "offset {} is past the end of the input ({} bytes)",
            options.offset,
            bytes.len()
        )));
    }

    let mut records = Vec::new();
    let mut pos = options.offset;
    while options.count.map_or(true, |count| records.len() < count) {
        if options.lines {
            while matches!(bytes.get(pos), Some(b'\n' | b'\r')) {
                pos += 1;
            }
        }
        let rest = &bytes[pos..];
        // A trailing newline or blank tail is not a record.
        if rest.len() < record_len && rest.iter().all(u8::is_ascii_whitespace) {
            if !rest.is_empty() {
                debug!(offset = pos, len = rest.len(), "ignoring trailing whitespace");
            }
            break;
        }

        let mut record = DynamicRecord::new(Arc::clone(schema));
        let consumed = codec::decode_into(bytes, pos, &mut record)
            .map_err(|source| CliError::Record { index: records.len(), source })?;
        records.push(record_to_json(&record, options.trim));
        pos += consumed;
    }
    Ok(records)
}

/// Round-trip JSON records through their fixed-width form.
///
/// The output has the same shape as the input: a single object or an array.
pub fn normalize(schema_path: &Path, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let (values, single) = parse_json_records(&read_input(input)?)?;
    let mut normalized = normalize_values(&schema, &values)?;

    let json = if single && normalized.len() == 1 {
        normalized.swap_remove(0)
    } else {
        serde_json::Value::Array(normalized)
    };
    write_output(output, format_json(&json)?.as_bytes())
}

fn normalize_values(
    schema: &Arc<Schema>,
    values: &[serde_json::Value],
) -> Result<Vec<serde_json::Value>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let mut record = record_from_json(schema, value)?;
            codec::normalize(&mut record).map_err(|source| CliError::Record { index, source })?;
            Ok(record_to_json(&record, false))
        })
        .collect()
}
