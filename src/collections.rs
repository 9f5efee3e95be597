use std::collections::HashMap;
use std::iter::FromIterator;
use std::ops::Deref;

use crate::element::{Element, MapKey};
use crate::error::{Error, Result};
use crate::field::Field;
use crate::types::FieldType;
use crate::value::Value;

/// Ordered, duplicate permitting sequence of elements.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct RepeatedField<T> {
    inner: Vec<T>,
}

impl<T: Element> RepeatedField<T> {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn push(&mut self, value: T) {
        self.inner.push(value);
    }

    /// Overwrites an existing element. Fails if `index` is past the end.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.inner.len();
        match self.inner.get_mut(index) {
            Some(v) => {
                *v = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfRange { index, len }),
        }
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    pub fn into_vec(self) -> Vec<T> {
        self.inner
    }

    /// Appends a dynamically typed value after validating it.
    pub fn push_value(&mut self, value: Value) -> Result<()> {
        let index = self.inner.len();
        let v = T::from_value(value).map_err(|e| Error::InElement {
            index,
            source: Box::new(e),
        })?;
        self.inner.push(v);
        Ok(())
    }

    /// Replaces all elements with the ones in `value`, which must be a
    /// [Value::List].
    ///
    /// All elements are converted before anything is stored, so on failure
    /// the current contents are untouched.
    pub fn replace_values(&mut self, value: Value) -> Result<()> {
        let items = match value {
            Value::List(items) => items,
            other => return Err(Error::mismatch(Self::TYPE, other.type_name())),
        };

        let mut converted = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            converted.push(T::from_value(item).map_err(|e| Error::InElement {
                index,
                source: Box::new(e),
            })?);
        }

        self.inner = converted;
        Ok(())
    }
}

impl<T> Deref for RepeatedField<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.inner
    }
}

impl<T> From<Vec<T>> for RepeatedField<T> {
    fn from(inner: Vec<T>) -> Self {
        Self { inner }
    }
}

impl<T> FromIterator<T> for RepeatedField<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RepeatedField<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T> IntoIterator for RepeatedField<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<T: Element> Field for RepeatedField<T> {
    const TYPE: FieldType = FieldType::Repeated(T::TYPE);

    fn get_value(&self) -> Value {
        Value::List(self.inner.iter().map(|v| v.to_value()).collect())
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        self.replace_values(value)
    }

    fn clear_value(&mut self) {
        self.clear();
    }

    fn default_value() -> Value {
        Value::List(vec![])
    }
}

/// Key unique map of elements. Iteration order is unspecified.
#[derive(Clone, Debug, PartialEq)]
pub struct MapField<K: MapKey, V: Element> {
    inner: HashMap<K, V>,
}

impl<K: MapKey, V: Element> Default for MapField<K, V> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<K: MapKey, V: Element> MapField<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the previous value stored under `key`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, K, V> {
        self.inner.iter()
    }

    /// Validates a dynamically typed pair and inserts it.
    pub fn insert_value(&mut self, key: Value, value: Value) -> Result<Option<V>> {
        let (k, v) = Self::convert_entry(key, value)?;
        Ok(self.inner.insert(k, v))
    }

    /// Replaces all entries with the ones in `value`, which must be a
    /// [Value::Map]. Later duplicates of a key override earlier ones.
    ///
    /// Every pair is converted before anything is stored, so on failure the
    /// current contents are untouched.
    pub fn replace_values(&mut self, value: Value) -> Result<()> {
        let entries = match value {
            Value::Map(entries) => entries,
            other => return Err(Error::mismatch(Self::TYPE, other.type_name())),
        };

        let mut converted = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            let (k, v) = Self::convert_entry(key, value)?;
            converted.insert(k, v);
        }

        self.inner = converted;
        Ok(())
    }

    fn convert_entry(key: Value, value: Value) -> Result<(K, V)> {
        let label = format!("{:?}", key);
        let wrap = |e: Error| Error::InEntry {
            key: label.clone(),
            source: Box::new(e),
        };

        let k = K::from_value(key).map_err(wrap)?;
        let v = V::from_value(value).map_err(wrap)?;
        Ok((k, v))
    }
}

impl<K: MapKey, V: Element> FromIterator<(K, V)> for MapField<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a, K: MapKey, V: Element> IntoIterator for &'a MapField<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<K: MapKey, V: Element> Field for MapField<K, V> {
    const TYPE: FieldType = FieldType::Map(K::KEY_TYPE, V::TYPE);

    fn get_value(&self) -> Value {
        Value::Map(
            self.inner
                .iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        self.replace_values(value)
    }

    fn clear_value(&mut self) {
        self.clear();
    }

    fn default_value() -> Value {
        Value::Map(vec![])
    }
}
