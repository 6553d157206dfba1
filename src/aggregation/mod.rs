//! Aggregation clauses.
//!
//! An aggregation is named by the caller and serializes as
//! `{ label: { type: options, aggs: { .. }, meta: { .. } } }`.

pub mod range;

pub use self::range::{
    DateRangeAggregation, IpRangeAggregation, RangeAggregation, RangeAggregationClause,
};

use crate::error::Result;
use crate::node::{Clause, ClauseNode, Family, OptionMap, Value, check_type};

/// State shared by every aggregation: its label, its typed node and the
/// aggregations nested under it.
#[derive(Debug, Clone)]
pub struct AggregationNode {
    label: String,
    node: ClauseNode,
    nested: Vec<Box<dyn Clause>>,
}

impl AggregationNode {
    /// Create an aggregation called `label` of type `agg_type`.
    pub fn new<L: Into<String>, T: Into<String>>(label: L, agg_type: T) -> Self {
        AggregationNode {
            label: label.into(),
            node: ClauseNode::new(agg_type),
            nested: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node(&self) -> &ClauseNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut ClauseNode {
        &mut self.node
    }

    pub fn nested(&self) -> &[Box<dyn Clause>] {
        &self.nested
    }

    /// Serialize one level. Nested aggregations are merged by label under `aggs`.
    pub fn to_value(&self) -> Result<Value> {
        let mut inner = OptionMap::new();
        inner.insert(
            self.node.name().to_string(),
            Value::Object(self.node.options().clone()),
        );
        if !self.nested.is_empty() {
            let mut aggs = OptionMap::new();
            for agg in &self.nested {
                match agg.to_value()? {
                    Value::Object(entries) => aggs.extend(entries),
                    other => {
                        aggs.insert(agg.name().to_string(), other);
                    }
                }
            }
            inner.insert("aggs".to_string(), Value::Object(aggs));
        }
        for (key, value) in self.node.body() {
            inner.insert(key.clone(), value.clone());
        }
        Ok(Value::single(self.label.clone(), Value::Object(inner)))
    }
}

/// Setters available on every aggregation.
pub trait AggregationClause: Clause + Sized {
    fn aggregation_node(&self) -> &AggregationNode;

    fn aggregation_node_mut(&mut self) -> &mut AggregationNode;

    /// The name this aggregation is reported under.
    fn label(&self) -> &str {
        self.aggregation_node().label()
    }

    /// Nest a sub-aggregation.
    fn aggregation<V: Into<Value>>(&mut self, agg: V) -> Result<&mut Self> {
        let agg = agg.into();
        check_type(&agg, Family::Aggregation)?;
        if let Value::Node(node) = agg {
            self.aggregation_node_mut().nested.push(node);
        }
        Ok(self)
    }

    /// Nest several sub-aggregations. Fails without storing anything if any
    /// is not an aggregation.
    fn aggregations<I, V>(&mut self, aggs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let aggs = aggs
            .into_iter()
            .map(|agg| {
                let agg = agg.into();
                check_type(&agg, Family::Aggregation).map(|_| agg)
            })
            .collect::<Result<Vec<_>>>()?;
        for agg in aggs {
            if let Value::Node(node) = agg {
                self.aggregation_node_mut().nested.push(node);
            }
        }
        Ok(self)
    }

    /// Attach metadata returned alongside the aggregation's response.
    fn meta(&mut self, meta: OptionMap) -> &mut Self {
        self.node_mut().set_body("meta", meta);
        self
    }
}
