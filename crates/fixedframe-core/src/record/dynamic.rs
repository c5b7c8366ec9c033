//! Schema-driven records.
//!
//! [`DynamicRecord`] holds field values keyed by name and checks them against the
//! schema it was created for. It is the record type used when the schema comes
//! from a description file rather than from a Rust type.

use std::collections::HashMap;
use std::sync::Arc;

use super::Record;
use crate::error::{FrameError, FrameResult};
use crate::schema::{FieldKind, Schema};
use crate::types::FieldValue;

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Value(FieldValue),
    Record(DynamicRecord),
}

/// A record whose fields are defined by a runtime [`Schema`].
///
/// # Example
///
/// ```
/// use fixedframe_core::{DynamicRecord, FieldValue, Schema};
///
/// let child = Schema::builder("Child").text("b", 2).build();
/// let schema = Schema::builder("Parent").integer("a", 3).nested("child", child).build();
///
/// let child_schema = schema.field("child").and_then(|f| match f.kind() {
///     fixedframe_core::FieldKind::Nested(c) => Some(c.clone()),
///     _ => None,
/// }).unwrap();
///
/// let record = DynamicRecord::new(schema)
///     .with_value("a", 7i64)
///     .with_nested("child", DynamicRecord::new(child_schema).with_value("b", "x"));
///
/// assert_eq!(record.value("a"), Some(&FieldValue::Integer(7)));
/// assert_eq!(record.record("child").and_then(|c| c.value("b")), Some(&"x".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    schema: Arc<Schema>,
    slots: HashMap<String, Slot>,
}

impl DynamicRecord {
    /// Creates an empty record for `schema`.
    #[must_use]
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self { schema: schema.into(), slots: HashMap::new() }
    }

    /// Sets a scalar value, builder style.
    ///
    /// The value is not checked here; a value that does not match its field is
    /// reported when the record is encoded.
    #[must_use]
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.slots.insert(field.into(), Slot::Value(value.into()));
        self
    }

    /// Sets a nested record, builder style.
    #[must_use]
    pub fn with_nested(mut self, field: impl Into<String>, record: Self) -> Self {
        self.slots.insert(field.into(), Slot::Record(record));
        self
    }

    /// Returns the value of a scalar field.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        match self.slots.get(field) {
            Some(Slot::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Returns the record stored in a nested field.
    #[must_use]
    pub fn record(&self, field: &str) -> Option<&Self> {
        match self.slots.get(field) {
            Some(Slot::Record(r)) => Some(r),
            _ => None,
        }
    }

    /// Stores a nested record after checking the field is a nested field of a
    /// matching record type.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::UnknownField`] if the schema has no nested field
    /// `field` whose schema matches the record's.
    pub fn set_nested(&mut self, field: &str, record: Self) -> FrameResult<()> {
        match self.schema.field(field).map(|f| f.kind()) {
            Some(FieldKind::Nested(child)) if **child == *record.schema => {
                self.slots.insert(field.to_owned(), Slot::Record(record));
                Ok(())
            }
            _ => Err(FrameError::unknown_field(self.schema.name(), field)),
        }
    }

    /// Removes a field's value or nested record.
    pub fn clear(&mut self, field: &str) {
        self.slots.remove(field);
    }

    /// Returns `true` if every field of the schema, recursively, holds a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.schema.fields().iter().all(|field| match (field.kind(), self.slots.get(field.name())) {
            (FieldKind::Scalar { .. }, Some(Slot::Value(_))) => true,
            (FieldKind::Nested(_), Some(Slot::Record(r))) => r.is_complete(),
            _ => false,
        })
    }
}

impl Record for DynamicRecord {
    fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        self.value(field).cloned()
    }

    fn set(&mut self, field: &str, value: FieldValue) -> FrameResult<()> {
        match self.schema.field(field).map(|f| f.kind()) {
            Some(FieldKind::Scalar { value_type, .. }) => {
                if value.value_type() != *value_type {
                    return Err(FrameError::unsupported_type(
                        self.schema.name(),
                        field,
                        *value_type,
                        value.value_type(),
                    ));
                }
                self.slots.insert(field.to_owned(), Slot::Value(value));
                Ok(())
            }
            _ => Err(FrameError::unknown_field(self.schema.name(), field)),
        }
    }

    fn nested(&self, field: &str) -> Option<&dyn Record> {
        self.record(field).map(|r| r as &dyn Record)
    }

    fn nested_mut(&mut self, field: &str) -> FrameResult<&mut dyn Record> {
        let child = match self.schema.field(field).map(|f| f.kind()) {
            Some(FieldKind::Nested(child)) => Arc::clone(child),
            Some(FieldKind::Scalar { .. }) => {
                return Err(FrameError::instantiation(
                    self.schema.name(),
                    field,
                    "field is a scalar, not a nested record",
                ))
            }
            None => return Err(FrameError::unknown_field(self.schema.name(), field)),
        };

        if !matches!(self.slots.get(field), Some(Slot::Record(_))) {
            self.slots.insert(field.to_owned(), Slot::Record(Self::new(child)));
        }
        match self.slots.get_mut(field) {
            Some(Slot::Record(r)) => Ok(r),
            _ => Err(FrameError::instantiation(
                self.schema.name(),
                field,
                "nested slot could not be initialized",
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::ValueType;

    fn parent() -> Arc<Schema> {
        let child = Schema::builder("Child").text("b", 2).build();
        Arc::new(Schema::builder("Parent").integer("a", 3).nested("child", child).build())
    }

    fn child_of(schema: &Schema) -> Arc<Schema> {
        match schema.field("child").map(|f| f.kind()) {
            Some(FieldKind::Nested(c)) => Arc::clone(c),
            _ => panic!("no child field"),
        }
    }

    #[test]
    fn set_checks_declared_type() {
        let mut record = DynamicRecord::new(parent());
        record.set("a", FieldValue::Integer(4)).unwrap();
        assert_eq!(record.value("a"), Some(&FieldValue::Integer(4)));

        let err = record.set("a", FieldValue::from("4")).unwrap_err();
        assert!(matches!(
            err,
            FrameError::UnsupportedType {
                expected: ValueType::Integer,
                actual: ValueType::Text,
                ..
            }
        ));
    }

    #[test]
    fn set_unknown_or_nested_field() {
        let mut record = DynamicRecord::new(parent());
        assert!(matches!(record.set("zz", 1i64.into()), Err(FrameError::UnknownField { .. })));
        assert!(matches!(record.set("child", 1i64.into()), Err(FrameError::UnknownField { .. })));
    }

    #[test]
    fn nested_mut_creates_blank_child() {
        let mut record = DynamicRecord::new(parent());
        assert!(record.nested("child").is_none());

        let child = record.nested_mut("child").unwrap();
        assert_eq!(child.schema().name(), "Child");
        child.set("b", "hi".into()).unwrap();

        assert_eq!(record.record("child").and_then(|c| c.value("b")), Some(&"hi".into()));
    }

    #[test]
    fn nested_mut_reuses_existing_child() {
        let schema = parent();
        let child = DynamicRecord::new(child_of(&schema)).with_value("b", "ok");
        let mut record = DynamicRecord::new(schema).with_nested("child", child);
        let nested = record.nested_mut("child").unwrap();
        assert_eq!(nested.get("b"), Some("ok".into()));
    }

    #[test]
    fn nested_mut_on_scalar_field_fails() {
        let mut record = DynamicRecord::new(parent());
        assert!(matches!(record.nested_mut("a"), Err(FrameError::Instantiation { .. })));
        assert!(matches!(record.nested_mut("nope"), Err(FrameError::UnknownField { .. })));
    }

    #[test]
    fn set_nested_checks_schema() {
        let schema = parent();
        let mut record = DynamicRecord::new(Arc::clone(&schema));
        let wrong = DynamicRecord::new(Schema::builder("Other").build());
        assert!(record.set_nested("child", wrong).is_err());
        record.set_nested("child", DynamicRecord::new(child_of(&schema))).unwrap();
        assert!(record.record("child").is_some());
    }

    #[test]
    fn completeness() {
        let schema = parent();
        let mut record = DynamicRecord::new(Arc::clone(&schema)).with_value("a", 1i64);
        assert!(!record.is_complete());
        record.set_nested("child", DynamicRecord::new(child_of(&schema))).unwrap();
        assert!(!record.is_complete());
        record.nested_mut("child").unwrap().set("b", "x".into()).unwrap();
        assert!(record.is_complete());
        record.clear("a");
        assert!(!record.is_complete());
    }
}
