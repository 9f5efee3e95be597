use std::any::Any;
use std::fmt::Debug;

use crate::descriptor::RecordDescriptor;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::value::Value;

/// Dynamic, name based access to the fields of a record.
///
/// Implemented with `#[derive(Record)]`. The struct fields are the typed
/// accessors; this trait exposes the same storage by field name with every
/// assignment validated against the declared type.
///
/// Records have no internal synchronization. Mutation goes through `&mut`, so
/// sharing an instance between threads needs the caller's own lock.
pub trait Record: Any + Debug + Send + Sync {
    fn descriptor(&self) -> &'static RecordDescriptor;

    /// Current value of a field, or its default if it is unset.
    fn get(&self, field: &str) -> Result<Value>;

    /// Validates and stores a value. On failure the record is unchanged.
    fn set(&mut self, field: &str, value: Value) -> Result<()>;

    /// Whether a presence tracking field was set. Fails for other fields.
    fn has(&self, field: &str) -> Result<bool>;

    /// Returns the field to its unset state.
    fn clear(&mut self, field: &str) -> Result<()>;

    fn box_clone(&self) -> Box<dyn Record>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn dyn_eq(&self, other: &dyn Record) -> bool;
}

impl Clone for Box<dyn Record> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl PartialEq for dyn Record {
    fn eq(&self, other: &dyn Record) -> bool {
        self.dyn_eq(other)
    }
}

impl dyn Record {
    pub fn downcast_ref<R: Record>(&self) -> Option<&R> {
        self.as_any().downcast_ref::<R>()
    }

    /// Sets several fields in order, stopping at the first failure.
    pub fn set_all<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        for (name, value) in values {
            self.set(name.as_ref(), value)?;
        }

        Ok(())
    }
}

/// Statically known record type.
pub trait RecordType: Record + Element {
    fn record_descriptor() -> &'static RecordDescriptor;

    /// Creates a record from an initial mapping of field names to values.
    ///
    /// Each pair goes through [Record::set], so construction enforces the
    /// same checks as later mutation.
    fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let mut record = Self::default();
        for (name, value) in values {
            record.set(name.as_ref(), value)?;
        }

        Ok(record)
    }
}

/// Conversion used by the generated `Element` impl of records: the value
/// must hold a record of exactly type `R`.
pub fn record_from_value<R: RecordType>(value: Value) -> Result<R> {
    match value {
        Value::Message(m) => {
            let found = m.descriptor().name;
            match m.into_any().downcast::<R>() {
                Ok(r) => Ok(*r),
                Err(_) => Err(Error::mismatch(R::TYPE, format!("message<{}>", found))),
            }
        }
        other => Err(Error::mismatch(R::TYPE, other.type_name())),
    }
}

/// Helpers called from code generated by the derive macros.
#[doc(hidden)]
pub mod __private {
    use super::*;

    pub fn unknown_field(descriptor: &'static RecordDescriptor, field: &str) -> Error {
        Error::UnknownField {
            record: descriptor.name,
            field: field.to_string(),
        }
    }

    pub fn no_presence(descriptor: &'static RecordDescriptor, field: &'static str) -> Error {
        Error::NoPresence {
            record: descriptor.name,
            field,
        }
    }

    pub fn in_field(
        descriptor: &'static RecordDescriptor,
        field: &'static str,
        source: Error,
    ) -> Error {
        log::trace!("rejected value for {}.{}: {}", descriptor.name, field, source);
        Error::InField {
            record: descriptor.name,
            field,
            source: Box::new(source),
        }
    }

    pub fn dyn_eq<R: Record + PartialEq>(this: &R, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<R>()
            .map_or(false, |other| this == other)
    }
}
