//! Term query for exact value matching.

use crate::error::Result;
use crate::node::value::impl_into_value;
use crate::node::{Clause, ClauseNode, Family, Value};
use crate::query::query::{QueryClause, field_level_value};

/// A query that matches documents containing an exact term.
#[derive(Debug, Clone)]
pub struct TermQuery {
    node: ClauseNode,
    field: Option<String>,
}

impl TermQuery {
    /// Create a new term query.
    pub fn new<F: Into<String>, V: Into<Value>>(field: F, value: V) -> Self {
        let mut node = ClauseNode::new("term");
        node.set_option("value", value);
        TermQuery {
            node,
            field: Some(field.into()),
        }
    }

    /// Set the field to search in.
    pub fn field<F: Into<String>>(&mut self, field: F) -> &mut Self {
        self.field = Some(field.into());
        self
    }

    /// Set the exact value to match.
    pub fn value<V: Into<Value>>(&mut self, value: V) -> &mut Self {
        self.node.set_option("value", value);
        self
    }

    /// Get the field name.
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl Clause for TermQuery {
    fn family(&self) -> Family {
        Family::Query
    }

    fn node(&self) -> &ClauseNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut ClauseNode {
        &mut self.node
    }

    fn clone_box(&self) -> Box<dyn Clause> {
        Box::new(self.clone())
    }

    fn to_value(&self) -> Result<Value> {
        Ok(field_level_value(&self.node, self.field.as_deref(), "value"))
    }
}

impl QueryClause for TermQuery {}

impl_into_value!(TermQuery);
