//! The composable node model shared by every clause.
//!
//! A clause is a [`ClauseNode`] (document key, options, body) wrapped in a
//! family-specific struct that implements [`Clause`]. Clauses nest inside
//! each other's options as [`Value::Node`] and are flattened into a plain
//! document by [`to_plain`].

pub mod consts;
pub mod guard;
pub mod value;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use self::guard::{check_enum, check_type, require_one_of};
pub use self::value::{OptionMap, Value, to_plain};

/// The capability family of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Query,
    /// Span queries; also valid wherever a query is expected.
    SpanQuery,
    Aggregation,
    ScoreFunction,
}

impl Family {
    /// Whether a clause of family `actual` may fill a slot requiring `self`.
    pub fn accepts(self, actual: Family) -> bool {
        self == actual || (self == Family::Query && actual == Family::SpanQuery)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Query => "query",
            Family::SpanQuery => "span query",
            Family::Aggregation => "aggregation",
            Family::ScoreFunction => "score function",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for every composable clause.
pub trait Clause: Send + Sync + fmt::Debug {
    /// The capability family used by nesting checks.
    fn family(&self) -> Family;

    /// The underlying node state.
    fn node(&self) -> &ClauseNode;

    /// Mutable access to the underlying node state.
    fn node_mut(&mut self) -> &mut ClauseNode;

    /// Clone this clause.
    fn clone_box(&self) -> Box<dyn Clause>;

    /// The document key this clause serializes under.
    fn name(&self) -> &str {
        self.node().name()
    }

    /// Produce one level of structure, which may still contain nested clauses.
    ///
    /// The default shape is `{ name: options + body }`.
    fn to_value(&self) -> Result<Value> {
        Ok(self.node().to_value())
    }

    /// Serialize the whole tree rooted at this clause into a plain document.
    fn to_json(&self) -> Result<serde_json::Value> {
        to_plain(&self.to_value()?)
    }
}

impl Clone for Box<dyn Clause> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Common state of a clause: its document key, options and body.
#[derive(Debug, Clone, Default)]
pub struct ClauseNode {
    name: String,
    options: OptionMap,
    body: OptionMap,
}

impl ClauseNode {
    /// Create a node serializing under `name`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        ClauseNode {
            name: name.into(),
            options: OptionMap::new(),
            body: OptionMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Set an option, replacing any previous value in place.
    pub fn set_option<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.options.insert(key.into(), value.into());
    }

    pub fn remove_option(&mut self, key: &str) -> Option<Value> {
        self.options.shift_remove(key)
    }

    /// Append to the array stored under `key`, creating it if needed.
    ///
    /// A non-array value already stored under `key` is replaced.
    pub fn push_option<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        let slot = self
            .options
            .entry(key.into())
            .or_insert_with(|| Value::Array(Vec::new()));
        match slot {
            Value::Array(items) => items.push(value.into()),
            other => *other = Value::Array(vec![value.into()]),
        }
    }

    pub fn body(&self) -> &OptionMap {
        &self.body
    }

    pub fn set_body<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.body.insert(key.into(), value.into());
    }

    /// Default serialization shape: `{ name: options + body }`.
    pub fn to_value(&self) -> Value {
        let mut inner = self.options.clone();
        for (key, value) in &self.body {
            inner.insert(key.clone(), value.clone());
        }
        Value::single(self.name.clone(), Value::Object(inner))
    }
}
