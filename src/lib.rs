#![deny(unused_must_use)]

//! Typed message runtime.
//!
//! Records are plain structs deriving [Record]; enums are closed Rust enums
//! deriving [Enumeration]. The derives generate static descriptors plus the
//! name based `get`/`set`/`has`/`clear` accessors, which validate every
//! assignment against the declared field type.

// Generated code refers to `::typed_record`, including inside this crate.
extern crate self as typed_record;

extern crate derive as _der;

// Derive macros share their names with the traits they implement.
pub use _der::{Enumeration, Record};

mod collections;
mod descriptor;
mod element;
mod enumeration;
mod error;
mod field;
mod record;
mod types;
mod value;

pub mod proto;
pub mod registry;

pub use collections::{MapField, RepeatedField};
pub use descriptor::{FieldDescriptor, FileDescriptor, RecordDescriptor};
pub use element::{Element, MapKey};
pub use enumeration::{enum_from_value, EnumDescriptor, EnumValueDescriptor, Enumeration};
pub use error::{Error, ErrorKind, Result};
pub use field::Field;
pub use record::{record_from_value, Record, RecordType};
pub use registry::Registry;
pub use types::{ElementType, EnumValue, FieldNumber, FieldType, ScalarType};
pub use value::Value;

/// Traits only, for `use typed_record::prelude::*`.
pub mod prelude {
    pub use crate::enumeration::Enumeration as _;
    pub use crate::record::{Record as _, RecordType as _};
    pub use crate::{Element as _, Field as _};
}

#[doc(hidden)]
pub mod derive {
    pub use crate::record::__private::*;
}
