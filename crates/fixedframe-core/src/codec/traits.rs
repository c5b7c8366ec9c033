//! Encoding and decoding traits for records.

use crate::error::FrameResult;
use crate::record::Record;

/// A trait for types that can be encoded to fixed-width bytes.
///
/// Implemented for every [`Record`].
pub trait Encoder {
    /// Encode this value to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is missing, has the wrong type, or has an
    /// invalid descriptor.
    fn encode(&self) -> FrameResult<Vec<u8>>;

    /// Encode this value into a pre-allocated buffer.
    ///
    /// This method appends the encoded bytes to the provided buffer,
    /// which can be more efficient when encoding multiple records.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn encode_to(&self, buf: &mut Vec<u8>) -> FrameResult<()>;
}

/// A trait for types that can be decoded from fixed-width bytes.
///
/// Implemented for every [`Record`] that has a [`Default`] value, which serves
/// as the blank instance decoding starts from.
pub trait Decoder: Sized {
    /// Decode a value from the start of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails (e.g., truncated input, unparsable field).
    fn decode(bytes: &[u8]) -> FrameResult<Self> {
        Self::decode_at(bytes, 0).map(|(value, _)| value)
    }

    /// Decode a value starting at `offset`, returning it with the number of
    /// bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails.
    fn decode_at(bytes: &[u8], offset: usize) -> FrameResult<(Self, usize)>;
}

impl<R: Record> Encoder for R {
    fn encode(&self) -> FrameResult<Vec<u8>> {
        super::encode(self)
    }

    fn encode_to(&self, buf: &mut Vec<u8>) -> FrameResult<()> {
        super::encode_to(self, buf)
    }
}

impl<R: Record + Default> Decoder for R {
    fn decode_at(bytes: &[u8], offset: usize) -> FrameResult<(Self, usize)> {
        super::decode_at(bytes, offset)
    }
}
