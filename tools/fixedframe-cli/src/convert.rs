//! Conversion between JSON objects and schema-driven records.
//!
//! JSON numbers map to integer, float and double fields, booleans to boolean
//! fields and strings to text fields. Temporal fields take ISO-8601 strings
//! (`2024-03-09T10:15:00` or a bare date for midnight).

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use fixedframe_core::{DynamicRecord, FieldKind, FieldValue, Record, Schema, ValueType};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::error::{CliError, Result};

const TEMPORAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Build a record from a JSON object.
///
/// Absent and `null` fields are left unset; encoding reports them as missing.
pub fn record_from_json(schema: &Arc<Schema>, value: &Value) -> Result<DynamicRecord> {
    record_at("", schema, value)
}

fn record_at(prefix: &str, schema: &Arc<Schema>, value: &Value) -> Result<DynamicRecord> {
    let object = value.as_object().ok_or_else(|| {
        let reason = format!("expected an object, got {value}");
        CliError::conversion(display_path(prefix, schema), reason)
    })?;

    for key in object.keys() {
        if schema.field(key).is_none() {
            warn!(record = schema.name(), field = %key, "ignoring field not in schema");
        }
    }

    let mut record = DynamicRecord::new(Arc::clone(schema));
    for field in schema.fields() {
        let path = join(prefix, field.name());
        let Some(json) = object.get(field.name()).filter(|v| !v.is_null()) else {
            continue;
        };
        match field.kind() {
            FieldKind::Nested(child) => {
                record = record.with_nested(field.name(), record_at(&path, child, json)?);
            }
            FieldKind::Scalar { value_type, .. } => {
                let value = value_from_json(&path, *value_type, json)?;
                record = record.with_value(field.name(), value);
            }
        }
    }
    Ok(record)
}

fn value_from_json(path: &str, value_type: ValueType, json: &Value) -> Result<FieldValue> {
    let mismatch = || CliError::conversion(path, format!("expected {value_type}, got {json}"));

    let value = match value_type {
        ValueType::Text => FieldValue::Text(json.as_str().ok_or_else(mismatch)?.to_owned()),
        ValueType::Integer => FieldValue::Integer(json.as_i64().ok_or_else(mismatch)?),
        #[allow(clippy::cast_possible_truncation)]
        ValueType::Float => FieldValue::Float(json.as_f64().ok_or_else(mismatch)? as f32),
        ValueType::Double => FieldValue::Double(json.as_f64().ok_or_else(mismatch)?),
        ValueType::Boolean => FieldValue::Boolean(json.as_bool().ok_or_else(mismatch)?),
        ValueType::Temporal => {
            let text = json.as_str().ok_or_else(mismatch)?;
            FieldValue::Temporal(parse_timestamp(text).ok_or_else(|| {
                CliError::conversion(path, format!("{text:?} is not an ISO-8601 date or date-time"))
            })?)
        }
    };
    Ok(value)
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    text.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| text.parse::<NaiveDate>().ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}

/// Convert a record to a JSON object with keys in schema order.
///
/// With `trim`, trailing padding spaces are removed from text values.
pub fn record_to_json(record: &DynamicRecord, trim: bool) -> Value {
    let schema = record.schema();
    let mut object = Map::new();
    for field in schema.fields() {
        let json = match field.kind() {
            FieldKind::Nested(_) => {
                record.record(field.name()).map_or(Value::Null, |r| record_to_json(r, trim))
            }
            FieldKind::Scalar { .. } => record.value(field.name()).map_or(Value::Null, |v| {
                if trim {
                    value_to_json(&v.trimmed())
                } else {
                    value_to_json(v)
                }
            }),
        };
        object.insert(field.name().to_owned(), json);
    }
    Value::Object(object)
}

/// Convert a field value to JSON.
pub fn value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Integer(i) => Value::Number((*i).into()),
        // Go through the shortest decimal form so 1.1f32 prints as 1.1.
        FieldValue::Float(f) => f
            .to_string()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        FieldValue::Double(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        FieldValue::Boolean(b) => Value::Bool(*b),
        FieldValue::Temporal(t) => Value::String(t.format(TEMPORAL_FORMAT).to_string()),
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn display_path(prefix: &str, schema: &Schema) -> String {
    if prefix.is_empty() {
        schema.name().to_owned()
    } else {
        prefix.to_owned()
    }
}
