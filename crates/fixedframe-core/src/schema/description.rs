//! Serializable schema descriptions.
//!
//! Schemas known only at runtime are described in TOML or JSON and turned into a
//! [`Schema`] with [`RecordDescription::into_schema`].
//!
//! # Example Description
//!
//! ```toml
//! name = "Order"
//!
//! [[fields]]
//! name = "id"
//! type = "integer"
//! length = 6
//!
//! [[fields]]
//! name = "placed"
//! type = "temporal"
//! length = 8
//! formatter = "%Y%m%d"
//!
//! [[fields]]
//! name = "customer"
//! type = "record"
//!
//! [fields.record]
//! name = "Customer"
//!
//! [[fields.record.fields]]
//! name = "name"
//! type = "text"
//! length = 10
//! padding = "_"
//! charset = "ISO-8859-1"
//! ```
//!
//! Structural problems (a `record` field without its nested table, a non-ASCII
//! padding character) are reported when the description is converted.
//! Descriptor invariants such as a positive length stay lazy and surface the
//! first time the field is encoded or decoded.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Field, FieldDescriptor, FieldKind, Padding, Schema, ValueType};
use crate::error::{FrameError, FrameResult};

/// The declared type of a described field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Text field
    Text,
    /// Integer field
    Integer,
    /// Single precision float field
    Float,
    /// Double precision float field
    Double,
    /// Boolean field
    Boolean,
    /// Temporal field
    Temporal,
    /// Nested record field
    Record,
}

impl FieldType {
    /// Returns the scalar value type, or `None` for nested records.
    #[must_use]
    pub const fn value_type(self) -> Option<ValueType> {
        match self {
            Self::Text => Some(ValueType::Text),
            Self::Integer => Some(ValueType::Integer),
            Self::Float => Some(ValueType::Float),
            Self::Double => Some(ValueType::Double),
            Self::Boolean => Some(ValueType::Boolean),
            Self::Temporal => Some(ValueType::Temporal),
            Self::Record => None,
        }
    }
}

impl From<ValueType> for FieldType {
    fn from(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Text => Self::Text,
            ValueType::Integer => Self::Integer,
            ValueType::Float => Self::Float,
            ValueType::Double => Self::Double,
            ValueType::Boolean => Self::Boolean,
            ValueType::Temporal => Self::Temporal,
        }
    }
}

/// Description of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescription {
    /// Record type name.
    pub name: String,

    /// Fields in layout order.
    #[serde(default)]
    pub fields: Vec<FieldDescription>,
}

/// Description of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescription {
    /// Field name.
    pub name: String,

    /// Declared type.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Byte length (scalar fields).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub length: usize,

    /// Padding character; the type's default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<char>,

    /// Charset name; UTF-8 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    /// Formatter pattern (temporal fields).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,

    /// Nested record (record fields).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordDescription>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl RecordDescription {
    /// Parses a description from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Description`] if the text is not a valid description.
    pub fn from_toml_str(s: &str) -> FrameResult<Self> {
        toml::from_str(s).map_err(|e| FrameError::Description(e.to_string()))
    }

    /// Parses a description from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Description`] if the text is not a valid description.
    pub fn from_json_str(s: &str) -> FrameResult<Self> {
        serde_json::from_str(s).map_err(|e| FrameError::Description(e.to_string()))
    }

    /// Loads a description file. Files ending in `.json` are read as JSON,
    /// everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Io`] if the file cannot be read and
    /// [`FrameError::Description`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Renders the description as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Description`] if serialization fails.
    pub fn to_toml_string(&self) -> FrameResult<String> {
        toml::to_string_pretty(self).map_err(|e| FrameError::Description(e.to_string()))
    }

    /// Converts the description into a schema.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Description`] for a record field without a nested
    /// record, or a padding character outside ASCII.
    pub fn into_schema(self) -> FrameResult<Schema> {
        let mut builder = Schema::builder(self.name.clone());
        for field in self.fields {
            builder = builder.field(field.into_field(&self.name)?);
        }
        Ok(builder.build())
    }
}

impl FieldDescription {
    fn into_field(self, record: &str) -> FrameResult<Field> {
        let kind = match self.field_type.value_type() {
            Some(value_type) => {
                let mut descriptor = FieldDescriptor::new(self.length);
                if let Some(padding) = self.padding {
                    let byte = u8::try_from(padding).ok().filter(u8::is_ascii).ok_or_else(|| {
                        FrameError::Description(format!(
                            "{record}.{}: padding {padding:?} is not an ASCII character",
                            self.name
                        ))
                    })?;
                    descriptor = descriptor.with_padding(byte);
                }
                if let Some(charset) = self.charset {
                    descriptor = descriptor.with_charset(charset);
                }
                if let Some(formatter) = self.formatter {
                    descriptor = descriptor.with_formatter(formatter);
                }
                FieldKind::Scalar { descriptor, value_type }
            }
            None => {
                let child = self.record.ok_or_else(|| {
                    FrameError::Description(format!(
                        "{record}.{}: record field has no nested record description",
                        self.name
                    ))
                })?;
                FieldKind::Nested(Arc::new(child.into_schema()?))
            }
        };
        Ok(Field::new(self.name, kind))
    }
}

impl Schema {
    /// Produces the serializable description of this schema.
    #[must_use]
    pub fn describe(&self) -> RecordDescription {
        let fields = self
            .fields()
            .iter()
            .map(|field| match field.kind() {
                FieldKind::Scalar { descriptor, value_type } => FieldDescription {
                    name: field.name().to_owned(),
                    field_type: FieldType::from(*value_type),
                    length: descriptor.length(),
                    padding: match descriptor.padding() {
                        Padding::Default => None,
                        Padding::Byte(b) => Some(char::from(b)),
                    },
                    charset: Some(descriptor.charset().to_owned()),
                    formatter: descriptor.formatter().map(str::to_owned),
                    record: None,
                },
                FieldKind::Nested(child) => FieldDescription {
                    name: field.name().to_owned(),
                    field_type: FieldType::Record,
                    length: 0,
                    padding: None,
                    charset: None,
                    formatter: None,
                    record: Some(child.describe()),
                },
            })
            .collect();
        RecordDescription { name: self.name().to_owned(), fields }
    }
}
