use std::collections::HashSet;

use crate::enumeration::EnumDescriptor;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::types::{FieldNumber, FieldType, MAX_FIELD_NUMBER, RESERVED_FIELD_NUMBERS};
use crate::value::Value;

#[derive(Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,

    /// Tag number of the field. Only meaningful to a wire codec.
    pub number: FieldNumber,

    pub ty: FieldType,

    /// Whether `has`/`clear` distinguish an unset field from one set to its
    /// default.
    pub presence: bool,

    pub default: fn() -> Value,
}

impl FieldDescriptor {
    pub fn default_value(&self) -> Value {
        (self.default)()
    }
}

/// Static description of one record (message) type.
#[derive(Debug)]
pub struct RecordDescriptor {
    /// Fully qualified name (e.g. `grpc.testing.SimpleResponse`).
    pub name: &'static str,

    /// Fields in declaration order.
    pub fields: &'static [FieldDescriptor],

    /// Creates an instance with every field unset.
    pub new: fn() -> Box<dyn Record>,
}

impl RecordDescriptor {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_number(&self, number: FieldNumber) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    pub fn new_instance(&self) -> Box<dyn Record> {
        (self.new)()
    }

    /// Checks field names and numbers. Referenced types are checked by the
    /// registry.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut numbers = HashSet::new();

        for f in self.fields {
            if f.number == 0
                || f.number > MAX_FIELD_NUMBER
                || RESERVED_FIELD_NUMBERS.contains(&f.number)
            {
                return Err(Error::Registration(format!(
                    "{}.{} uses invalid field number {}",
                    self.name, f.name, f.number
                )));
            }

            if !names.insert(f.name) {
                return Err(Error::Registration(format!(
                    "{} declares field {} twice",
                    self.name, f.name
                )));
            }

            if !numbers.insert(f.number) {
                return Err(Error::Registration(format!(
                    "{} declares field number {} twice",
                    self.name, f.number
                )));
            }

            if let FieldType::Map(key, _) = f.ty {
                if !key.is_valid_map_key() {
                    return Err(Error::Registration(format!(
                        "{}.{} can't use {} as a map key",
                        self.name, f.name, key
                    )));
                }
            }
        }

        Ok(())
    }
}

/// All types declared by one schema file, registered together.
pub struct FileDescriptor {
    /// Path of the schema file (e.g. `src/proto/grpc/testing/messages.proto`).
    pub name: &'static str,
    pub package: &'static str,
    pub records: &'static [fn() -> &'static RecordDescriptor],
    pub enums: &'static [fn() -> &'static EnumDescriptor],
    pub dependencies: &'static [&'static FileDescriptor],
}

impl std::fmt::Debug for FileDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDescriptor")
            .field("name", &self.name)
            .field("package", &self.package)
            .field("records", &self.records.len())
            .field("enums", &self.enums.len())
            .field(
                "dependencies",
                &self.dependencies.iter().map(|d| d.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
