use crate::element::Element;
use crate::error::Result;
use crate::types::FieldType;
use crate::value::Value;

/// Storage for one declared field of a record.
///
/// Plain scalars and enums use implicit presence: they always hold a value
/// and can't report whether it was set. `Option<T>` is used for fields which
/// track presence (optional scalars and message fields).
pub trait Field {
    const TYPE: FieldType;

    /// Whether or not `has_value` is meaningful for this storage.
    const PRESENCE: bool = false;

    /// Returns the current value, or the type's default when unset.
    fn get_value(&self) -> Value;

    /// Validates and stores `value`. On failure the field is left untouched.
    fn set_value(&mut self, value: Value) -> Result<()>;

    /// Returns None if this field doesn't track presence.
    fn has_value(&self) -> Option<bool> {
        None
    }

    fn clear_value(&mut self);

    /// Value returned by `get_value` on a cleared field.
    fn default_value() -> Value
    where
        Self: Sized;
}

/// Implements [Field] for an element type stored with implicit presence.
///
/// Used here for scalars and by the derive macros for enums.
#[macro_export]
macro_rules! impl_singular_field {
    ($($t:ty),*) => {
        $(
            impl $crate::Field for $t {
                const TYPE: $crate::FieldType =
                    $crate::FieldType::Singular(<$t as $crate::Element>::TYPE);

                fn get_value(&self) -> $crate::Value {
                    $crate::Element::to_value(self)
                }

                fn set_value(&mut self, value: $crate::Value) -> $crate::Result<()> {
                    *self = <$t as $crate::Element>::from_value(value)?;
                    Ok(())
                }

                fn clear_value(&mut self) {
                    *self = <$t as ::std::default::Default>::default();
                }

                fn default_value() -> $crate::Value {
                    $crate::Element::to_value(&<$t as ::std::default::Default>::default())
                }
            }
        )*
    };
}

impl_singular_field!(i32, i64, u32, u64, f32, f64, bool, String, Vec<u8>);

impl<T: Element> Field for Option<T> {
    const TYPE: FieldType = FieldType::Singular(T::TYPE);
    const PRESENCE: bool = true;

    fn get_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => T::default().to_value(),
        }
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        *self = Some(T::from_value(value)?);
        Ok(())
    }

    fn has_value(&self) -> Option<bool> {
        Some(self.is_some())
    }

    fn clear_value(&mut self) {
        *self = None;
    }

    fn default_value() -> Value {
        T::default().to_value()
    }
}
