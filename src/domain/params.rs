// Parameter values: call-site bindings and their resolution against a payload

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Concrete parameter values for one bind call. `Value::Null` marks an
/// explicit absence.
pub type BoundParams = HashMap<String, Value>;

/// Parameter name to value specification
pub type ParamSpecs = HashMap<String, ParamSpec>;

type ParamFn = dyn Fn(&Value) -> Value + Send + Sync;

/// How a parameter gets its value from the request payload
#[derive(Clone)]
pub enum ParamSpec {
    /// A literal, or an `"@dotted.path"` extractor when it is a string
    /// starting with `@`
    Value(Value),
    /// Called with the payload
    Computed(Arc<ParamFn>),
}

impl ParamSpec {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        ParamSpec::Computed(Arc::new(f))
    }

    pub fn resolve(&self, data: &Value) -> Value {
        match self {
            ParamSpec::Computed(f) => f(data),
            ParamSpec::Value(Value::String(spec)) if spec.starts_with('@') => {
                value_at_path(data, &spec[1..]).cloned().unwrap_or(Value::Null)
            }
            ParamSpec::Value(value) => value.clone(),
        }
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamSpec::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ParamSpec::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for ParamSpec {
    fn from(value: Value) -> Self {
        ParamSpec::Value(value)
    }
}

impl From<&str> for ParamSpec {
    fn from(value: &str) -> Self {
        ParamSpec::Value(Value::String(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for ParamSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ParamSpec::Value)
    }
}

/// Resolve every spec against `data`
pub fn resolve_params<'a, I>(data: &Value, specs: I) -> BoundParams
where
    I: IntoIterator<Item = (&'a String, &'a ParamSpec)>,
{
    specs
        .into_iter()
        .map(|(name, spec)| (name.clone(), spec.resolve(data)))
        .collect()
}

/// Read a dotted path such as `author.emails.0` off a JSON value.
/// Numeric components index into arrays.
pub fn value_at_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, key| match current {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Text form of a bound value, `None` when absent
pub fn to_param_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| to_param_string(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Split a `NAME=VALUE` assignment. The value is read as JSON when it
/// parses, otherwise kept as a plain string.
pub fn parse_assignment(raw: &str) -> Option<(String, Value)> {
    let (name, value) = raw.split_once('=')?;
    if name.is_empty() {
        return None;
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Some((name.to_string(), value))
}
