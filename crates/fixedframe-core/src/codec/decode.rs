//! Record decoding.

use tracing::trace;

use super::scalar::ScalarField;
use crate::error::{FrameError, FrameResult};
use crate::record::Record;
use crate::schema::{FieldKind, Schema};

/// Read position over an input buffer.
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    #[inline]
    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    /// Consumes exactly `n` bytes, or nothing if fewer remain.
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.remaining() < n {
            return None;
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Some(slice)
    }
}

/// Decodes fields laid out by `schema` from `cursor` into `target`.
///
/// Nested records are obtained from the target through
/// [`Record::nested_mut`], which creates blank instances as needed.
pub(crate) fn decode_record(
    cursor: &mut Cursor<'_>,
    schema: &Schema,
    target: &mut dyn Record,
) -> FrameResult<()> {
    for field in schema.fields() {
        match field.kind() {
            FieldKind::Nested(child) => {
                let nested = target.nested_mut(field.name())?;
                decode_record(cursor, child, nested)?;
            }
            FieldKind::Scalar { descriptor, value_type } => {
                let scalar =
                    ScalarField::resolve(schema.name(), field.name(), descriptor, *value_type)?;
                let offset = cursor.position();
                let available = cursor.remaining();
                let bytes = cursor.take(scalar.length()).ok_or_else(|| {
                    FrameError::TruncatedInput {
                        record: schema.name().to_owned(),
                        field: field.name().to_owned(),
                        descriptor: scalar.descriptor().to_string(),
                        offset,
                        needed: scalar.length(),
                        available,
                    }
                })?;
                let value = scalar.decode(bytes)?;
                trace!(record = schema.name(), field = field.name(), offset, "decoded field");
                target.set(field.name(), value)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_take_is_all_or_nothing() {
        let mut cursor = Cursor::new(b"abcde", 1);
        assert_eq!(cursor.take(2), Some(&b"bc"[..]));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.take(3), None);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.take(2), Some(&b"de"[..]));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn cursor_past_end_has_nothing_remaining() {
        let mut cursor = Cursor::new(b"ab", 5);
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.take(1), None);
    }
}
