//! Builder values and the recursive serializer.
//!
//! A [`Value`] is anything that can sit in a clause's option map: scalars,
//! ordered sequences, ordered mappings, and other clauses. [`to_plain`]
//! flattens a value into a node-free [`serde_json::Value`].

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::trace;
use serde::{Serialize, Serializer};
use serde_json::Number;

use crate::error::Result;
use crate::node::Clause;

/// Ordered mapping from option key to value.
pub type OptionMap = IndexMap<String, Value>;

/// A value inside a clause tree.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(OptionMap),
    /// A nested clause, expanded by [`to_plain`].
    Node(Box<dyn Clause>),
}

impl Value {
    /// Wrap a clause as a value.
    pub fn node<C: Clause + 'static>(clause: C) -> Self {
        Value::Node(Box::new(clause))
    }

    /// Build a single-entry mapping.
    pub fn single<K: Into<String>, V: Into<Value>>(key: K, value: V) -> Self {
        let mut map = OptionMap::new();
        map.insert(key.into(), value.into());
        Value::Object(map)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&OptionMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&dyn Clause> {
        match self {
            Value::Node(node) => Some(node.as_ref()),
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "boolean".to_string(),
            Value::Number(_) => "number".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Array(_) => "array".to_string(),
            Value::Object(_) => "mapping".to_string(),
            Value::Node(node) => format!("{} clause '{}'", node.family(), node.name()),
        }
    }

    /// Flatten this value into plain JSON. See [`to_plain`].
    pub fn to_plain(&self) -> Result<serde_json::Value> {
        to_plain(self)
    }
}

/// Convert a value into plain nested data.
///
/// Nodes are expanded through [`Clause::to_value`] and the result is walked
/// again, so a clause only has to produce one level of structure. Key order
/// of every mapping is preserved. The only failure source is a clause whose
/// own serialization step rejects its current state.
pub fn to_plain(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Value::Number(n.clone()),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(
            items.iter().map(to_plain).collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), to_plain(item)?);
            }
            serde_json::Value::Object(out)
        }
        Value::Node(node) => {
            trace!("expanding {} clause '{}'", node.family(), node.name());
            to_plain(&node.to_value()?)?
        }
    })
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let plain = to_plain(self).map_err(<S::Error as serde::ser::Error>::custom)?;
        plain.serialize(serializer)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        // NaN and infinities have no JSON form.
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::from(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<OptionMap> for Value {
    fn from(map: OptionMap) -> Self {
        Value::Object(map)
    }
}

impl From<Box<dyn Clause>> for Value {
    fn from(node: Box<dyn Clause>) -> Self {
        Value::Node(node)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::String(dt.to_rfc3339())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Implements `From<Clause>` for [`Value`] on concrete clause types.
macro_rules! impl_into_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $crate::node::Value {
                fn from(clause: $ty) -> Self {
                    $crate::node::Value::Node(Box::new(clause))
                }
            }
        )*
    };
}

pub(crate) use impl_into_value;

/// Build an [`OptionMap`] from `key => value` pairs.
///
/// ```
/// use elastic_builder::options;
///
/// let range = options! { "from" => 10, "to" => 20 };
/// assert_eq!(range.len(), 2);
/// ```
#[macro_export]
macro_rules! options {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::node::OptionMap::new();
        $(
            map.insert(($key).to_string(), $crate::node::Value::from($value));
        )*
        map
    }};
}
