//! Canonical query parameters.
//!
//! Binance signs the exact query string it receives, so the client needs a
//! single, reproducible rendering of a parameter set. [`Params`] keeps its
//! entries sorted by key and joins them as `key=value&...` without any
//! percent-encoding. Values must already be in their wire form.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::BinanceError;

/// An ordered set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: BTreeMap<String, String>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a serializable request struct into parameters.
    ///
    /// Strings are taken verbatim, numbers and booleans use their textual
    /// form and `null` fields are skipped. Nested arrays or objects are
    /// rejected since they have no query string representation.
    pub fn from_serialize<T>(value: &T) -> Result<Self, BinanceError>
    where
        T: Serialize + ?Sized,
    {
        let fields = match serde_json::to_value(value)? {
            Value::Object(fields) => fields,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(BinanceError::InvalidParameter(format!(
                    "expected a struct of parameters, got {other}"
                )));
            }
        };

        let mut params = Self::new();
        for (key, value) in fields {
            match value {
                Value::Null => {}
                Value::String(s) => {
                    params.entries.insert(key, s);
                }
                Value::Number(n) => {
                    params.entries.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    params.entries.insert(key, b.to_string());
                }
                Value::Array(_) | Value::Object(_) => {
                    return Err(BinanceError::InvalidParameter(format!(
                        "parameter '{key}' is not a scalar"
                    )));
                }
            }
        }
        Ok(params)
    }

    /// Insert a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries.insert(key.into(), value.to_string());
        self
    }

    /// Insert a parameter only when a value is present.
    pub fn insert_opt<V: Display>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Builder-style [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Get the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check whether a parameter is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the parameters in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the canonical query string, `key1=value1&key2=value2&...`.
    ///
    /// Keys are sorted lexicographically. An empty set renders as `""`.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl std::fmt::Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Return `value` if it is one of `supported`, otherwise `default`.
///
/// Endpoints with a fixed menu of choices (depth, page sizes) fall back
/// rather than fail on an unsupported value.
pub fn supported_or(value: u32, supported: &[u32], default: u32) -> u32 {
    if supported.contains(&value) { value } else { default }
}
