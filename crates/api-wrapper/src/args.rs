//! Assembled handler arguments

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Named argument values passed to a wrapped handler.
///
/// # Example
/// ```ignore
/// fn handler(args: Args) -> Result<String, ApiError> {
///     let name: String = args.get("name")?;
///     let page: i64 = args.get("page")?;
///     Ok(format!("{} page {}", name, page))
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: HashMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an argument deserialized as `T`.
    ///
    /// Returns `ParameterNotFound` if absent and `ParameterTypeMismatch` if
    /// the value cannot be read as `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, ApiError> {
        let value = self.values.get(name).ok_or_else(|| ApiError::not_found(name))?;
        T::deserialize(value).map_err(|_| ApiError::mismatch(name, std::any::type_name::<T>(), render(value)))
    }

    /// Get a string argument without cloning
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Copy every entry of `other` into `self`. Entries of `other` win on
    /// key collision.
    pub fn overlay(&mut self, other: Args) {
        self.values.extend(other.values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The arguments as a JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.values.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Raw text of a value for error messages: strings unquoted, the rest as JSON
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
