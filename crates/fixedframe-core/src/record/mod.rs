//! Field access for the codec.
//!
//! The codec never inspects a record's memory layout. It reads and writes fields
//! by name through the [`Record`] trait, which each record type implements
//! explicitly:
//!
//! ```
//! use std::sync::{Arc, OnceLock};
//!
//! use fixedframe_core::{codec, FieldValue, FrameError, FrameResult, Record, Schema};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Item {
//!     sku: String,
//!     qty: i64,
//! }
//!
//! impl Record for Item {
//!     fn schema(&self) -> Arc<Schema> {
//!         static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
//!         let schema = SCHEMA.get_or_init(|| {
//!             Arc::new(Schema::builder("Item").text("sku", 4).integer("qty", 3).build())
//!         });
//!         Arc::clone(schema)
//!     }
//!
//!     fn get(&self, field: &str) -> Option<FieldValue> {
//!         match field {
//!             "sku" => Some(self.sku.clone().into()),
//!             "qty" => Some(self.qty.into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set(&mut self, field: &str, value: FieldValue) -> FrameResult<()> {
//!         match field {
//!             "sku" => self.sku = value.extract("Item", field)?,
//!             "qty" => self.qty = value.extract("Item", field)?,
//!             _ => return Err(FrameError::unknown_field("Item", field)),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let item = Item { sku: "AB".into(), qty: 7 };
//! let bytes = codec::encode(&item).unwrap();
//! assert_eq!(bytes, b"AB  007");
//!
//! let decoded: Item = codec::decode(&bytes).unwrap();
//! assert_eq!(decoded.qty, 7);
//! ```

mod dynamic;

pub use dynamic::DynamicRecord;

use std::sync::Arc;

use crate::error::{FrameError, FrameResult};
use crate::schema::Schema;
use crate::types::FieldValue;

/// A record the codec can read from and write into.
///
/// `get` and `set` serve scalar fields. `nested` and `nested_mut` serve nested
/// record fields; `nested_mut` doubles as the record factory, producing a
/// default-initialized child when the slot is empty.
///
/// Records without nested fields only implement the scalar methods.
pub trait Record {
    /// The record type's schema.
    fn schema(&self) -> Arc<Schema>;

    /// Returns the current value of a scalar field, or `None` if it is absent.
    fn get(&self, field: &str) -> Option<FieldValue>;

    /// Stores a decoded value into a scalar field.
    ///
    /// # Errors
    ///
    /// Implementations return [`FrameError::UnsupportedType`] when the value does
    /// not fit the field and [`FrameError::UnknownField`] for unknown names.
    fn set(&mut self, field: &str, value: FieldValue) -> FrameResult<()>;

    /// Returns the nested record stored in `field`, or `None` if it is absent.
    fn nested(&self, _field: &str) -> Option<&dyn Record> {
        None
    }

    /// Returns the nested record stored in `field` for decoding into, creating a
    /// default-initialized one first if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Instantiation`] if no instance can be produced.
    fn nested_mut(&mut self, field: &str) -> FrameResult<&mut dyn Record> {
        Err(FrameError::instantiation(
            self.schema().name(),
            field,
            "record type does not provide nested records",
        ))
    }
}
