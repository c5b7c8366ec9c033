//! Record encoding.

use tracing::trace;

use super::scalar::ScalarField;
use crate::error::{FrameError, FrameResult};
use crate::record::Record;
use crate::schema::{FieldKind, Schema};

/// Appends the encoding of `record`, laid out by `schema`, to `buf`.
///
/// Fields are written in schema order; nested records are encoded in place
/// against the child schema declared by the parent.
pub(crate) fn encode_record(
    record: &dyn Record,
    schema: &Schema,
    buf: &mut Vec<u8>,
) -> FrameResult<()> {
    for field in schema.fields() {
        match field.kind() {
            FieldKind::Nested(child) => {
                let nested = record
                    .nested(field.name())
                    .ok_or_else(|| FrameError::missing_value(schema.name(), field.name()))?;
                encode_record(nested, child, buf)?;
            }
            FieldKind::Scalar { descriptor, value_type } => {
                let value = record
                    .get(field.name())
                    .ok_or_else(|| FrameError::missing_value(schema.name(), field.name()))?;
                let scalar =
                    ScalarField::resolve(schema.name(), field.name(), descriptor, *value_type)?;
                let start = buf.len();
                scalar.encode_to(&value, buf)?;
                trace!(
                    record = schema.name(),
                    field = field.name(),
                    offset = start,
                    length = scalar.length(),
                    "encoded field"
                );
            }
        }
    }
    Ok(())
}
