//! Named request params.
//!
//! [`Params`] is the input of every server call. Lookups never mutate and
//! never fall back to defaults: an absent key is reported as [`ParamError::Missing`].
mod value;
pub use value::ParamValue;

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::{ParamError, ParamResult};

/// Mapping from param names to values, backed by a [`BTreeMap`].
///
/// Keys are unique; iteration and [`fmt::Display`] follow key order.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty param map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a param map holding a single entry.
    pub fn single<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let mut p = Self::new();
        p.set(key, value);
        p
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `key` is present, whatever its value.
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or overwrite a value.
    ///
    /// Returns `self` for chaining.
    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a value.
    ///
    /// Fails with [`ParamError::Missing`] when the key is absent.
    pub fn get(&self, key: &str) -> ParamResult<&ParamValue> {
        self.0.get(key).ok_or_else(|| ParamError::Missing {
            param: key.to_string(),
        })
    }

    pub fn get_string(&self, key: &str) -> ParamResult<&str> {
        self.get_as(key, "string", ParamValue::as_str)
    }

    pub fn get_int(&self, key: &str) -> ParamResult<i64> {
        self.get_as(key, "int", ParamValue::as_int)
    }

    /// Reads a float; integer values are accepted and widened.
    pub fn get_float(&self, key: &str) -> ParamResult<f64> {
        self.get_as(key, "float", ParamValue::as_float)
    }

    pub fn get_bool(&self, key: &str) -> ParamResult<bool> {
        self.get_as(key, "bool", ParamValue::as_bool)
    }

    pub fn get_params(&self, key: &str) -> ParamResult<&Params> {
        self.get_as(key, "params", ParamValue::as_params)
    }

    /// Look up a dotted path through nested maps (`"resize.width"`).
    ///
    /// Errors carry the full path up to and including the failing segment.
    pub fn lookup(&self, path: &str) -> ParamResult<&ParamValue> {
        match path.split_once('.') {
            None => self.get(path),
            Some((head, rest)) => self
                .get_params(head)?
                .lookup(rest)
                .map_err(|e| e.prefixed(head)),
        }
    }

    fn get_as<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        cast: impl FnOnce(&'a ParamValue) -> Option<T>,
    ) -> ParamResult<T> {
        cast(self.get(key)?).ok_or_else(|| ParamError::InvalidType {
            param: key.to_string(),
            expected,
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}
