//! The fixed-width codec.
//!
//! This module converts records to and from their fixed-width byte form by
//! walking the record's [`Schema`](crate::Schema) left to right.
//!
//! # Entry Points
//!
//! - [`encode`] / [`encode_to`] - Serialize a record
//! - [`decode`] / [`decode_at`] - Deserialize into a fresh `Default` instance
//! - [`decode_into`] - Deserialize into an existing instance
//! - [`normalize`] - Re-parse a record's own encoding back into it
//!
//! The [`Encoder`] and [`Decoder`] traits expose the same operations as methods.
//!
//! # Layout
//!
//! The encoding of a record is the concatenation of its fields in schema order.
//! Every scalar field occupies exactly its descriptor's length, so the total
//! length is [`Schema::encoded_len`](crate::Schema::encoded_len) whatever the
//! values are. Nested records contribute their own encoding in place.
//!
//! # Example
//!
//! ```
//! use fixedframe_core::{codec, DynamicRecord, Schema};
//!
//! let schema = Schema::builder("Flag").boolean("on", 3).build();
//! let record = DynamicRecord::new(schema).with_value("on", true);
//!
//! let bytes = codec::encode(&record).unwrap();
//! assert_eq!(bytes, b"1  ");
//! ```

mod decode;
mod encode;
mod scalar;
mod traits;


pub use traits::{Decoder, Encoder};

use tracing::trace;

use self::decode::{decode_record, Cursor};
use self::encode::encode_record;
use crate::error::FrameResult;
use crate::record::Record;

/// Encodes a record.
///
/// # Errors
///
/// - [`FrameError::MissingValue`](crate::FrameError::MissingValue) if a field has no value
/// - [`FrameError::UnsupportedType`](crate::FrameError::UnsupportedType) if a value does not
///   match its field
/// - [`FrameError::Schema`](crate::FrameError::Schema) if a descriptor is invalid
pub fn encode(record: &dyn Record) -> FrameResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(record.schema().encoded_len());
    encode_to(record, &mut buf)?;
    Ok(buf)
}

/// Appends the encoding of a record to `buf`.
///
/// On error, `buf` may hold a partial record.
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_to(record: &dyn Record, buf: &mut Vec<u8>) -> FrameResult<()> {
    let schema = record.schema();
    let start = buf.len();
    encode_record(record, &schema, buf)?;
    trace!(record = schema.name(), len = buf.len() - start, "encoded record");
    Ok(())
}

/// Decodes a record from the start of `bytes`.
///
/// # Errors
///
/// - [`FrameError::TruncatedInput`](crate::FrameError::TruncatedInput) if the input ends inside
///   a field
/// - [`FrameError::FieldParse`](crate::FrameError::FieldParse) if a field's text cannot be parsed
/// - [`FrameError::Schema`](crate::FrameError::Schema) if a descriptor is invalid
/// - [`FrameError::Instantiation`](crate::FrameError::Instantiation) if a nested record cannot
///   be created
pub fn decode<R: Record + Default>(bytes: &[u8]) -> FrameResult<R> {
    decode_at(bytes, 0).map(|(record, _)| record)
}

/// Decodes a record starting at `offset`, returning it with the number of bytes
/// consumed.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_at<R: Record + Default>(bytes: &[u8], offset: usize) -> FrameResult<(R, usize)> {
    let mut record = R::default();
    let consumed = decode_into(bytes, offset, &mut record)?;
    Ok((record, consumed))
}

/// Decodes into an existing record starting at `offset`, returning the number of
/// bytes consumed.
///
/// Every field declared by the schema is overwritten. On error, fields before the
/// failing one have already been written.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_into(bytes: &[u8], offset: usize, target: &mut dyn Record) -> FrameResult<usize> {
    let schema = target.schema();
    let mut cursor = Cursor::new(bytes, offset);
    decode_record(&mut cursor, &schema, target)?;
    let consumed = cursor.position() - offset;
    trace!(record = schema.name(), offset, consumed, "decoded record");
    Ok(consumed)
}

/// Re-decodes a record's own encoding back into it.
///
/// This canonicalizes values the way a storage round trip would (a text value
/// longer than its field is cut, a short one gains its padding) and surfaces any
/// error a later round trip would hit.
///
/// # Errors
///
/// Any error from [`encode`] or [`decode_into`].
pub fn normalize<R: Record>(record: &mut R) -> FrameResult<&mut R> {
    let bytes = encode(record)?;
    decode_into(&bytes, 0, record)?;
    Ok(record)
}
