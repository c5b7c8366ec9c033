//! `fixedframe` Core
//!
//! This crate encodes and decodes fixed-width, text-based records. A record is an
//! ordered list of named fields, each occupying a constant number of bytes. Numeric
//! fields are zero-padded on the left, text fields are space-padded on the right,
//! and records may nest other records.
//!
//! # Overview
//!
//! - **Schemas**: [`Schema`], [`Field`], [`FieldKind`] and [`FieldDescriptor`] describe
//!   the byte layout of a record type
//! - **Values**: [`FieldValue`] is the closed set of scalar values a field can hold
//! - **Records**: the [`Record`] trait is how the codec reads and writes fields;
//!   [`DynamicRecord`] implements it for schemas only known at runtime
//! - **Codec**: [`codec::encode`], [`codec::decode`] and [`codec::normalize`]
//! - **Descriptions**: [`RecordDescription`] loads schemas from TOML or JSON
//!
//! # Example
//!
//! ```
//! use fixedframe_core::{codec, DynamicRecord, FieldValue, Record, Schema};
//!
//! let schema = Schema::builder("Order").integer("id", 5).text("item", 6).build();
//!
//! let order = DynamicRecord::new(schema)
//!     .with_value("id", 42i64)
//!     .with_value("item", "pen");
//!
//! let bytes = codec::encode(&order).unwrap();
//! assert_eq!(bytes, b"00042pen   ");
//!
//! let mut decoded = DynamicRecord::new(order.schema());
//! codec::decode_into(&bytes, 0, &mut decoded).unwrap();
//! assert_eq!(decoded.value("id"), Some(&FieldValue::Integer(42)));
//! ```
//!
//! # Modules
//!
//! - [`schema`] - Schema model, descriptors and serializable descriptions
//! - [`types`] - Field values and charsets
//! - [`record`] - Field accessor and record factory capability
//! - [`codec`] - The encode/decode engine
//! - [`error`] - Error types ([`FrameError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod codec;
pub mod error;
pub mod record;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use codec::{Decoder, Encoder};
pub use error::{DescriptorError, FrameError, FrameResult};
pub use record::{DynamicRecord, Record};
pub use schema::{
    Field, FieldDescriptor, FieldDescription, FieldKind, FieldLayout, FieldType, PadSide, Padding,
    RecordDescription, Schema, SchemaBuilder, ValueType,
};
pub use types::{Charset, FieldValue, Scalar};
