//! Byte encodings for text-bearing fields.

use std::fmt;
use std::str::FromStr;

use crate::error::DescriptorError;

/// Replacement byte for characters a charset cannot represent.
const REPLACEMENT: u8 = b'?';

/// A byte encoding named by a field descriptor.
///
/// Names are matched case-insensitively, with the common aliases accepted:
///
/// ```
/// use fixedframe_core::Charset;
///
/// assert_eq!("utf8".parse::<Charset>().unwrap(), Charset::Utf8);
/// assert_eq!("Latin1".parse::<Charset>().unwrap(), Charset::Iso8859_1);
/// assert!("EBCDIC".parse::<Charset>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// UTF-8
    #[default]
    Utf8,
    /// 7-bit US-ASCII
    UsAscii,
    /// ISO-8859-1 (Latin-1)
    Iso8859_1,
}

impl Charset {
    /// Looks up a charset by name.
    #[must_use]
    pub fn for_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Some(Self::Utf8),
            "US-ASCII" | "ASCII" | "US_ASCII" => Some(Self::UsAscii),
            "ISO-8859-1" | "ISO8859-1" | "ISO8859_1" | "ISO_8859_1" | "LATIN1" | "LATIN-1" => {
                Some(Self::Iso8859_1)
            }
            _ => None,
        }
    }

    /// Returns the canonical name of this charset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::UsAscii => "US-ASCII",
            Self::Iso8859_1 => "ISO-8859-1",
        }
    }

    /// Encodes text, replacing unmappable characters with `?`.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::UsAscii => {
                text.chars().map(|c| if c.is_ascii() { c as u8 } else { REPLACEMENT }).collect()
            }
            Self::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(REPLACEMENT))
                .collect(),
        }
    }

    /// Decodes bytes, replacing invalid sequences with U+FFFD.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::UsAscii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
                .collect(),
            Self::Iso8859_1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

impl FromStr for Charset {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_name(s).ok_or_else(|| DescriptorError::UnknownCharset(s.to_owned()))
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
