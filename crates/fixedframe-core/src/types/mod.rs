//! Value types held by record fields.

mod charset;
mod value;

pub use charset::Charset;
pub use value::{FieldValue, Scalar};
