//! Error types for the core crate.
//!
//! Every failure is fatal to the enclosing encode or decode call. Errors carry the
//! record type name and field name, plus the field's descriptor summary where one
//! exists, so a failure can be diagnosed without re-running it.

use thiserror::Error;

use crate::schema::ValueType;

/// Maximum length for field text shown in error messages.
const MAX_VALUE_DISPLAY_LEN: usize = 100;

/// Result type for codec operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// A field descriptor that violates its own invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The declared byte length is zero.
    #[error("length must be positive")]
    ZeroLength,

    /// A temporal field has no formatter pattern.
    #[error("a formatter must be set for temporal fields")]
    MissingFormatter,

    /// The formatter pattern cannot be used to format or parse a value.
    #[error("invalid formatter pattern {0:?}")]
    InvalidFormatter(String),

    /// The charset name is not one this crate can encode.
    #[error("unknown charset {0:?}")]
    UnknownCharset(String),
}

/// Errors that can occur while encoding or decoding records.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A field descriptor violates its invariants.
    #[error("schema error at {record}.{field}({descriptor}): {source}")]
    Schema {
        /// The record type name.
        record: String,
        /// The field name.
        field: String,
        /// Summary of the offending descriptor.
        descriptor: String,
        /// The violated invariant.
        #[source]
        source: DescriptorError,
    },

    /// A field has no value when encoding.
    #[error("value of field is missing: {record}.{field}")]
    MissingValue {
        /// The record type name.
        record: String,
        /// The field name.
        field: String,
    },

    /// A field value does not match the field's declared value type.
    #[error("unsupported type at {record}.{field}: declared {expected}, got {actual}")]
    UnsupportedType {
        /// The record type name.
        record: String,
        /// The field name.
        field: String,
        /// The declared value type.
        expected: ValueType,
        /// The value type that was supplied.
        actual: ValueType,
    },

    /// The input ended before a field's bytes could be read.
    #[error(
        "input ends in {record}.{field}({descriptor}): {needed} bytes at {offset}, {available} left"
    )]
    TruncatedInput {
        /// The record type name.
        record: String,
        /// The field name.
        field: String,
        /// Summary of the field descriptor.
        descriptor: String,
        /// Offset of the field in the input.
        offset: usize,
        /// The field's byte length.
        needed: usize,
        /// Bytes remaining from `offset`.
        available: usize,
    },

    /// Decoded field text cannot be parsed into the field's value type.
    #[error(
        "failed to parse {record}.{field}({descriptor}) from {text:?} as {value_type}: {reason}"
    )]
    FieldParse {
        /// The record type name.
        record: String,
        /// The field name.
        field: String,
        /// Summary of the field descriptor.
        descriptor: String,
        /// The declared value type.
        value_type: ValueType,
        /// The decoded text (truncated for display).
        text: String,
        /// The underlying parse failure.
        reason: String,
    },

    /// A nested record instance could not be produced for decoding.
    #[error("failed to construct a new instance for {record}.{field}: {reason}")]
    Instantiation {
        /// The record type name.
        record: String,
        /// The field name.
        field: String,
        /// Why no instance could be produced.
        reason: String,
    },

    /// A record does not expose a field its schema declares.
    #[error("unknown field: {record}.{field}")]
    UnknownField {
        /// The record type name.
        record: String,
        /// The field name.
        field: String,
    },

    /// A schema description cannot be turned into a schema.
    #[error("invalid schema description: {0}")]
    Description(String),

    /// A schema description file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// Creates a schema error for a descriptor invariant violation.
    #[must_use]
    pub fn schema(
        record: impl Into<String>,
        field: impl Into<String>,
        descriptor: impl std::fmt::Display,
        source: DescriptorError,
    ) -> Self {
        Self::Schema {
            record: record.into(),
            field: field.into(),
            descriptor: descriptor.to_string(),
            source,
        }
    }

    /// Creates a missing value error.
    #[must_use]
    pub fn missing_value(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingValue { record: record.into(), field: field.into() }
    }

    /// Creates an unsupported type error.
    #[must_use]
    pub fn unsupported_type(
        record: impl Into<String>,
        field: impl Into<String>,
        expected: ValueType,
        actual: ValueType,
    ) -> Self {
        Self::UnsupportedType { record: record.into(), field: field.into(), expected, actual }
    }

    /// Creates a field parse error.
    ///
    /// The text is truncated to 100 characters for display.
    #[must_use]
    pub fn field_parse(
        record: impl Into<String>,
        field: impl Into<String>,
        descriptor: impl std::fmt::Display,
        value_type: ValueType,
        text: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        let text = match text.char_indices().nth(MAX_VALUE_DISPLAY_LEN) {
            Some((end, _)) => format!("{}...", &text[..end]),
            None => text.to_owned(),
        };
        Self::FieldParse {
            record: record.into(),
            field: field.into(),
            descriptor: descriptor.to_string(),
            value_type,
            text,
            reason: reason.to_string(),
        }
    }

    /// Creates an instantiation error.
    #[must_use]
    pub fn instantiation(
        record: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Instantiation { record: record.into(), field: field.into(), reason: reason.into() }
    }

    /// Creates an unknown field error.
    #[must_use]
    pub fn unknown_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField { record: record.into(), field: field.into() }
    }

    /// Returns the field name the error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Schema { field, .. }
            | Self::MissingValue { field, .. }
            | Self::UnsupportedType { field, .. }
            | Self::TruncatedInput { field, .. }
            | Self::FieldParse { field, .. }
            | Self::Instantiation { field, .. }
            | Self::UnknownField { field, .. } => Some(field),
            Self::Description(_) | Self::Io(_) => None,
        }
    }

    /// Returns the record type name the error refers to, if any.
    #[must_use]
    pub fn record(&self) -> Option<&str> {
        match self {
            Self::Schema { record, .. }
            | Self::MissingValue { record, .. }
            | Self::UnsupportedType { record, .. }
            | Self::TruncatedInput { record, .. }
            | Self::FieldParse { record, .. }
            | Self::Instantiation { record, .. }
            | Self::UnknownField { record, .. } => Some(record),
            Self::Description(_) | Self::Io(_) => None,
        }
    }
}
