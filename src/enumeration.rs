use std::convert::TryFrom;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::element::Element;
use crate::error::{Error, Result};
use crate::types::EnumValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValueDescriptor {
    pub name: &'static str,
    pub number: EnumValue,
}

/// Immutable name <-> value table of one enum type.
///
/// Instances are `static` data emitted by `#[derive(Enumeration)]`.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Fully qualified name (e.g. `grpc.testing.PayloadType`).
    pub name: &'static str,
    pub values: &'static [EnumValueDescriptor],
}

impl EnumDescriptor {
    /// Symbolic name of a member.
    pub fn name(&self, value: EnumValue) -> Result<&'static str> {
        self.values
            .iter()
            .find(|v| v.number == value)
            .map(|v| v.name)
            .ok_or(Error::UndefinedValue {
                enumeration: self.name,
                value: i128::from(value),
            })
    }

    /// Looks up a member by name ignoring ASCII case, so `unary_call` finds
    /// `UNARY_CALL`.
    pub fn value(&self, name: &str) -> Result<EnumValue> {
        self.values
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .map(|v| v.number)
            .ok_or_else(|| Error::UndefinedName {
                enumeration: self.name,
                name: name.to_string(),
            })
    }

    pub fn contains(&self, value: EnumValue) -> bool {
        self.values.iter().any(|v| v.number == value)
    }

    /// Value of the first declared member, which is the default of fields of
    /// this type.
    pub fn default_value(&self) -> Option<EnumValue> {
        self.values.first().map(|v| v.number)
    }

    /// Checks that the table is a bijection with canonical upper case names.
    pub fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(Error::Registration(format!(
                "enum {} has no values",
                self.name
            )));
        }

        let mut names = HashSet::new();
        let mut numbers = HashSet::new();
        for v in self.values {
            if v.name.is_empty() || v.name.chars().any(|c| c.is_ascii_lowercase()) {
                return Err(Error::Registration(format!(
                    "enum {} has non-canonical value name {:?}",
                    self.name, v.name
                )));
            }

            if !names.insert(v.name) {
                return Err(Error::Registration(format!(
                    "enum {} declares name {} twice",
                    self.name, v.name
                )));
            }

            if !numbers.insert(v.number) {
                return Err(Error::Registration(format!(
                    "enum {} declares value {} twice",
                    self.name, v.number
                )));
            }
        }

        Ok(())
    }
}

/// Common trait implemented by all enum types deriving `Enumeration`.
pub trait Enumeration: Element + Copy + Eq + Hash + Debug {
    fn descriptor() -> &'static EnumDescriptor;

    /// Should convert a number to a valid branch of the enum, or None if the
    /// value is not in the enum.
    fn from_i32(v: EnumValue) -> Option<Self>;

    /// Exact match against the canonical name.
    fn from_name(name: &str) -> Option<Self>;

    fn value(&self) -> EnumValue;

    fn name(&self) -> &'static str;

    fn try_from_value(v: EnumValue) -> Result<Self> {
        Self::from_i32(v).ok_or(Error::UndefinedValue {
            enumeration: Self::descriptor().name,
            value: i128::from(v),
        })
    }

    /// Case insensitive lookup, see [EnumDescriptor::value].
    fn try_from_name(name: &str) -> Result<Self> {
        let v = Self::descriptor().value(name)?;
        Self::try_from_value(v)
    }
}

/// Conversion used by the generated `Element` impl of enums: the value must
/// be an integer which names a member.
pub fn enum_from_value<E: Enumeration>(value: crate::Value) -> Result<E> {
    let v = match value {
        crate::Value::Int(v) => i128::from(v),
        crate::Value::UInt(v) => i128::from(v),
        other => {
            return Err(Error::mismatch(E::TYPE, other.type_name()));
        }
    };

    let undefined = || Error::UndefinedValue {
        enumeration: E::descriptor().name,
        value: v,
    };

    let v = EnumValue::try_from(v).map_err(|_| undefined())?;
    E::from_i32(v).ok_or_else(undefined)
}
