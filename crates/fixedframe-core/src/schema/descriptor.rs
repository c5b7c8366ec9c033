//! Per-field layout descriptors and value type tags.

use std::fmt;

use chrono::format::{Fixed, Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;
use crate::types::Charset;

/// The value type of a scalar field.
///
/// The type decides how a value is rendered to text, which padding character is
/// used by default, and on which side padding goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Text in the field's charset.
    Text,
    /// Signed integer rendered in decimal.
    Integer,
    /// Single precision float rendered in decimal.
    Float,
    /// Double precision float rendered in decimal.
    Double,
    /// Flag rendered as `1` or `0`.
    Boolean,
    /// Date/time rendered through the field's formatter.
    Temporal,
}

impl ValueType {
    /// Returns `true` for integer, float and double fields.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Double)
    }

    /// Returns the padding byte used when the descriptor leaves it unset.
    #[must_use]
    pub const fn default_padding(self) -> u8 {
        if self.is_numeric() {
            b'0'
        } else {
            b' '
        }
    }

    /// Returns the side on which short values are padded.
    #[must_use]
    pub const fn pad_side(self) -> PadSide {
        if self.is_numeric() {
            PadSide::Leading
        } else {
            PadSide::Trailing
        }
    }

    /// Returns the lowercase name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Temporal => "temporal",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of a field on which padding is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadSide {
    /// Padding precedes the value (right-justified).
    Leading,
    /// Padding follows the value (left-justified).
    Trailing,
}

/// The padding character of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Padding {
    /// Use the value type's default: `'0'` for numbers, `' '` otherwise.
    #[default]
    Default,
    /// Use this byte.
    Byte(u8),
}

impl Padding {
    /// Resolves the padding byte for a value type.
    #[must_use]
    pub const fn resolve(self, value_type: ValueType) -> u8 {
        match self {
            Self::Default => value_type.default_padding(),
            Self::Byte(b) => b,
        }
    }
}

/// Layout of one scalar field: byte length, padding, charset and formatter.
///
/// Descriptors are purely descriptive. Their invariants are only checked by
/// [`FieldDescriptor::validate`], which the codec calls the first time the field
/// is encoded or decoded.
///
/// # Example
///
/// ```
/// use fixedframe_core::{FieldDescriptor, Padding};
///
/// let desc = FieldDescriptor::new(8).with_padding(b'*').with_charset("ISO-8859-1");
/// assert_eq!(desc.length(), 8);
/// assert_eq!(desc.padding(), Padding::Byte(b'*'));
/// assert_eq!(desc.to_string(), "length=8, padding='*', charset=ISO-8859-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    length: usize,
    padding: Padding,
    charset: String,
    formatter: Option<String>,
}

impl FieldDescriptor {
    /// Creates a descriptor with the given byte length and default options.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            padding: Padding::Default,
            charset: Charset::Utf8.name().to_owned(),
            formatter: None,
        }
    }

    /// Sets an explicit padding byte.
    #[must_use]
    pub const fn with_padding(mut self, padding: u8) -> Self {
        self.padding = Padding::Byte(padding);
        self
    }

    /// Sets the charset name.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Sets the formatter pattern (chrono strftime syntax).
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }

    /// The field's byte length.
    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// The configured padding.
    #[inline]
    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// The charset name.
    #[inline]
    #[must_use]
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// The formatter pattern, if any.
    #[inline]
    #[must_use]
    pub fn formatter(&self) -> Option<&str> {
        self.formatter.as_deref()
    }

    /// Resolves the padding byte for a value type.
    #[must_use]
    pub const fn effective_padding(&self, value_type: ValueType) -> u8 {
        self.padding.resolve(value_type)
    }

    /// Checks the descriptor's invariants for a field of `value_type`.
    ///
    /// Returns the resolved charset.
    ///
    /// # Errors
    ///
    /// - [`DescriptorError::ZeroLength`] if the length is zero
    /// - [`DescriptorError::UnknownCharset`] if the charset name is not known
    /// - [`DescriptorError::MissingFormatter`] for a temporal field without formatter
    /// - [`DescriptorError::InvalidFormatter`] if the formatter is not a valid pattern
    ///   or names a time zone, which a naive date-time cannot render
    pub fn validate(&self, value_type: ValueType) -> Result<Charset, DescriptorError> {
        if self.length == 0 {
            return Err(DescriptorError::ZeroLength);
        }
        let charset = self.charset.parse::<Charset>()?;
        if value_type == ValueType::Temporal {
            let formatter = match self.formatter.as_deref() {
                Some(f) if !f.is_empty() => f,
                _ => return Err(DescriptorError::MissingFormatter),
            };
            if StrftimeItems::new(formatter).any(|item| !renders_naive(&item)) {
                return Err(DescriptorError::InvalidFormatter(formatter.to_owned()));
            }
        }
        Ok(charset)
    }
}

fn renders_naive(item: &Item<'_>) -> bool {
    !matches!(
        item,
        Item::Error
            | Item::Fixed(
                Fixed::TimezoneName
                    | Fixed::TimezoneOffset
                    | Fixed::TimezoneOffsetZ
                    | Fixed::TimezoneOffsetColon
                    | Fixed::TimezoneOffsetColonZ
                    | Fixed::TimezoneOffsetDoubleColon
                    | Fixed::TimezoneOffsetTripleColon
                    | Fixed::RFC2822
                    | Fixed::RFC3339
            )
    )
}

impl From<usize> for FieldDescriptor {
    #[inline]
    fn from(length: usize) -> Self {
        Self::new(length)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "length={}, ", self.length)?;
        match self.padding {
            Padding::Default => f.write_str("padding=default")?,
            Padding::Byte(b) => write!(f, "padding={:?}", char::from(b))?,
        }
        write!(f, ", charset={}", self.charset)?;
        if let Some(formatter) = &self.formatter {
            write!(f, ", formatter={formatter:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_types_pad_leading_with_zero() {
        for ty in [ValueType::Integer, ValueType::Float, ValueType::Double] {
            assert!(ty.is_numeric());
            assert_eq!(ty.default_padding(), b'0');
            assert_eq!(ty.pad_side(), PadSide::Leading);
        }
    }

    #[test]
    fn other_types_pad_trailing_with_space() {
        for ty in [ValueType::Text, ValueType::Boolean, ValueType::Temporal] {
            assert!(!ty.is_numeric());
            assert_eq!(ty.default_padding(), b' ');
            assert_eq!(ty.pad_side(), PadSide::Trailing);
        }
    }

    #[test]
    fn explicit_padding_overrides_default() {
        let desc = FieldDescriptor::new(4).with_padding(b'_');
        assert_eq!(desc.effective_padding(ValueType::Integer), b'_');
        assert_eq!(FieldDescriptor::new(4).effective_padding(ValueType::Integer), b'0');
    }

    #[test]
    fn validate_zero_length() {
        let err = FieldDescriptor::new(0).validate(ValueType::Text).unwrap_err();
        assert_eq!(err, DescriptorError::ZeroLength);
    }

    #[test]
    fn validate_temporal_requires_formatter() {
        let desc = FieldDescriptor::new(8);
        assert_eq!(desc.validate(ValueType::Temporal), Err(DescriptorError::MissingFormatter));
        assert_eq!(
            desc.clone().with_formatter("").validate(ValueType::Temporal),
            Err(DescriptorError::MissingFormatter)
        );
        assert_eq!(desc.with_formatter("%Y%m%d").validate(ValueType::Temporal), Ok(Charset::Utf8));
    }

    #[test]
    fn validate_rejects_broken_pattern() {
        let desc = FieldDescriptor::new(8).with_formatter("%Y%Q");
        assert!(matches!(
            desc.validate(ValueType::Temporal),
            Err(DescriptorError::InvalidFormatter(_))
        ));
    }

    #[test]
    fn validate_rejects_timezone_items() {
        for pattern in ["%Y%m%d%z", "%Z", "%H:%M%:z", "%+"] {
            let desc = FieldDescriptor::new(32).with_formatter(pattern);
            assert_eq!(
                desc.validate(ValueType::Temporal),
                Err(DescriptorError::InvalidFormatter(pattern.to_owned())),
                "{pattern}"
            );
        }
        let desc = FieldDescriptor::new(32).with_formatter("%Y-%m-%dT%H:%M:%S%.3f");
        assert_eq!(desc.validate(ValueType::Temporal), Ok(Charset::Utf8));
    }

    #[test]
    fn validate_unknown_charset() {
        let desc = FieldDescriptor::new(3).with_charset("EBCDIC");
        assert!(matches!(desc.validate(ValueType::Text), Err(DescriptorError::UnknownCharset(_))));
    }

    #[test]
    fn formatter_ignored_for_non_temporal() {
        let desc = FieldDescriptor::new(3).with_formatter("%Q");
        assert_eq!(desc.validate(ValueType::Integer), Ok(Charset::Utf8));
    }

    #[test]
    fn display_summary() {
        let desc = FieldDescriptor::new(8).with_formatter("%Y%m%d");
        assert_eq!(
            desc.to_string(),
            "length=8, padding=default, charset=UTF-8, formatter=\"%Y%m%d\""
        );
    }
}
