use std::convert::TryFrom;
use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::types::{ElementType, ScalarType};
use crate::value::Value;

/// A single typed value which can be stored in a field: a scalar, an enum or
/// a record.
///
/// Implemented here for all scalar types. `#[derive(Enumeration)]` and
/// `#[derive(Record)]` implement it for enums and records.
pub trait Element: Clone + Default + PartialEq + Debug + Send + Sync + 'static {
    const TYPE: ElementType;

    fn to_value(&self) -> Value;

    /// Converts a dynamic value into this type, failing if the value is of
    /// the wrong kind or can't be represented without loss.
    fn from_value(value: Value) -> Result<Self>;
}

/// Scalar types usable as map keys.
pub trait MapKey: Element + Eq + std::hash::Hash {
    const KEY_TYPE: ScalarType;
}

pub(crate) fn integer<T>(value: Value, ty: ScalarType) -> Result<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    match value {
        Value::Int(v) => T::try_from(v).map_err(|_| Error::range(v, ty)),
        Value::UInt(v) => T::try_from(v).map_err(|_| Error::range(v, ty)),
        other => Err(Error::mismatch(ty, other.type_name())),
    }
}

fn double(value: Value, ty: ScalarType) -> Result<f64> {
    match value {
        Value::Float(v) => Ok(v),
        Value::Int(v) => Ok(v as f64),
        Value::UInt(v) => Ok(v as f64),
        other => Err(Error::mismatch(ty, other.type_name())),
    }
}

macro_rules! impl_integer {
    ($($t:ty => $scalar:ident, $variant:ident, $wide:ty);*) => {
        $(
            impl Element for $t {
                const TYPE: ElementType = ElementType::Scalar(ScalarType::$scalar);

                fn to_value(&self) -> Value {
                    Value::$variant(*self as $wide)
                }

                fn from_value(value: Value) -> Result<Self> {
                    integer(value, ScalarType::$scalar)
                }
            }

            impl MapKey for $t {
                const KEY_TYPE: ScalarType = ScalarType::$scalar;
            }
        )*
    };
}

impl_integer!(
    i32 => Int32, Int, i64;
    i64 => Int64, Int, i64;
    u32 => UInt32, UInt, u64;
    u64 => UInt64, UInt, u64
);

impl Element for f64 {
    const TYPE: ElementType = ElementType::Scalar(ScalarType::Double);

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        double(value, ScalarType::Double)
    }
}

impl Element for f32 {
    const TYPE: ElementType = ElementType::Scalar(ScalarType::Float);

    fn to_value(&self) -> Value {
        Value::Float(*self as f64)
    }

    fn from_value(value: Value) -> Result<Self> {
        let v = double(value, ScalarType::Float)?;
        // Infinities and NaN are representable. Only finite overflow is lossy.
        if v.is_finite() && v.abs() > f32::MAX as f64 {
            return Err(Error::range(v, ScalarType::Float));
        }

        Ok(v as f32)
    }
}

impl Element for bool {
    const TYPE: ElementType = ElementType::Scalar(ScalarType::Bool);

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(Error::mismatch(ScalarType::Bool, other.type_name())),
        }
    }
}

impl MapKey for bool {
    const KEY_TYPE: ScalarType = ScalarType::Bool;
}

impl Element for String {
    const TYPE: ElementType = ElementType::Scalar(ScalarType::String);

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            Value::Bytes(data) => String::from_utf8(data).map_err(|e| Error::EncodingError {
                valid_up_to: e.utf8_error().valid_up_to(),
            }),
            other => Err(Error::mismatch(ScalarType::String, other.type_name())),
        }
    }
}

impl MapKey for String {
    const KEY_TYPE: ScalarType = ScalarType::String;
}

/// Bytes fields never check the encoding of their contents.
impl Element for Vec<u8> {
    const TYPE: ElementType = ElementType::Scalar(ScalarType::Bytes);

    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(data) => Ok(data),
            Value::String(s) => Ok(s.into_bytes()),
            other => Err(Error::mismatch(ScalarType::Bytes, other.type_name())),
        }
    }
}
