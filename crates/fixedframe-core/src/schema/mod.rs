//! Record schemas.
//!
//! A [`Schema`] is the ordered list of a record type's fields. Field order defines
//! both the byte layout and the traversal order of the codec, and is the same for
//! encoding and decoding.
//!
//! Each [`Field`] is either a scalar with a [`FieldDescriptor`] and a
//! [`ValueType`], or a nested record with its own schema:
//!
//! ```
//! use fixedframe_core::{FieldDescriptor, Schema};
//!
//! let customer = Schema::builder("Customer")
//!     .text("name", 10)
//!     .text("city", FieldDescriptor::new(8).with_charset("ISO-8859-1"))
//!     .build();
//!
//! let order = Schema::builder("Order")
//!     .integer("id", 6)
//!     .nested("customer", customer)
//!     .temporal("placed", FieldDescriptor::new(8).with_formatter("%Y%m%d"))
//!     .build();
//!
//! assert_eq!(order.encoded_len(), 6 + 10 + 8 + 8);
//!
//! let layout = order.layout();
//! assert_eq!(layout[2].path, "customer.city");
//! assert_eq!(layout[2].offset, 16);
//! ```

mod description;
mod descriptor;

use std::sync::Arc;

pub use description::{FieldDescription, FieldType, RecordDescription};
pub use descriptor::{FieldDescriptor, PadSide, Padding, ValueType};

/// The kind of a field: a scalar value or a nested record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A directly encodable value.
    Scalar {
        /// The field's layout.
        descriptor: FieldDescriptor,
        /// The field's value type.
        value_type: ValueType,
    },
    /// A nested record laid out by its own schema.
    Nested(Arc<Schema>),
}

/// A named slot in a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    kind: FieldKind,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(), kind }
    }

    /// The field name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns the number of bytes this field occupies.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match &self.kind {
            FieldKind::Scalar { descriptor, .. } => descriptor.length(),
            FieldKind::Nested(child) => child.encoded_len(),
        }
    }
}

/// Position of a scalar field within an encoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    /// Dotted path from the root record (`customer.city`).
    pub path: String,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Byte length.
    pub length: usize,
    /// Value type.
    pub value_type: ValueType,
}

/// The ordered field list of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    /// Starts building a schema for the record type `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder { name: name.into(), fields: Vec::new() }
    }

    /// The record type name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in layout order.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the length of every encoded instance of this schema.
    ///
    /// This is the sum of all scalar field lengths plus the totals of nested
    /// records. It does not depend on field values.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.fields.iter().map(Field::encoded_len).sum()
    }

    /// Flattens the schema into the positions of its scalar fields.
    #[must_use]
    pub fn layout(&self) -> Vec<FieldLayout> {
        let mut out = Vec::new();
        self.collect_layout("", 0, &mut out);
        out
    }

    fn collect_layout(&self, prefix: &str, mut offset: usize, out: &mut Vec<FieldLayout>) -> usize {
        for field in &self.fields {
            let path = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{prefix}.{}", field.name)
            };
            match &field.kind {
                FieldKind::Scalar { descriptor, value_type } => {
                    out.push(FieldLayout {
                        path,
                        offset,
                        length: descriptor.length(),
                        value_type: *value_type,
                    });
                    offset += descriptor.length();
                }
                FieldKind::Nested(child) => {
                    offset = child.collect_layout(&path, offset, out);
                }
            }
        }
        offset
    }
}

/// Builder for [`Schema`].
///
/// Fields are appended in call order. Descriptors are taken as
/// `impl Into<FieldDescriptor>`, so a bare length works for default options.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a scalar field.
    #[must_use]
    pub fn scalar(
        self,
        name: impl Into<String>,
        value_type: ValueType,
        descriptor: impl Into<FieldDescriptor>,
    ) -> Self {
        let kind = FieldKind::Scalar { descriptor: descriptor.into(), value_type };
        self.field(Field::new(name, kind))
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(self, name: impl Into<String>, descriptor: impl Into<FieldDescriptor>) -> Self {
        self.scalar(name, ValueType::Text, descriptor)
    }

    /// Appends an integer field.
    #[must_use]
    pub fn integer(self, name: impl Into<String>, descriptor: impl Into<FieldDescriptor>) -> Self {
        self.scalar(name, ValueType::Integer, descriptor)
    }

    /// Appends a single precision float field.
    #[must_use]
    pub fn float(self, name: impl Into<String>, descriptor: impl Into<FieldDescriptor>) -> Self {
        self.scalar(name, ValueType::Float, descriptor)
    }

    /// Appends a double precision float field.
    #[must_use]
    pub fn double(self, name: impl Into<String>, descriptor: impl Into<FieldDescriptor>) -> Self {
        self.scalar(name, ValueType::Double, descriptor)
    }

    /// Appends a boolean field.
    #[must_use]
    pub fn boolean(self, name: impl Into<String>, descriptor: impl Into<FieldDescriptor>) -> Self {
        self.scalar(name, ValueType::Boolean, descriptor)
    }

    /// Appends a temporal field. The descriptor needs a formatter.
    #[must_use]
    pub fn temporal(self, name: impl Into<String>, descriptor: impl Into<FieldDescriptor>) -> Self {
        self.scalar(name, ValueType::Temporal, descriptor)
    }

    /// Appends a nested record field.
    #[must_use]
    pub fn nested(self, name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        self.field(Field::new(name, FieldKind::Nested(schema.into())))
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema { name: self.name, fields: self.fields }
    }
}
