//! The bare `weight` score function.

use crate::error::Result;
use crate::node::value::impl_into_value;
use crate::node::{Clause, ClauseNode, Family, Value};
use crate::score_function::ScoreFunctionClause;

/// Multiplies the score by a constant; serializes as `{ weight: n, filter: .. }`.
#[derive(Debug, Clone)]
pub struct WeightScoreFunction {
    node: ClauseNode,
}

impl WeightScoreFunction {
    pub fn new<V: Into<Value>>(weight: V) -> Self {
        let mut node = ClauseNode::new("weight");
        node.set_body("weight", weight);
        WeightScoreFunction { node }
    }
}

impl Clause for WeightScoreFunction {
    fn family(&self) -> Family {
        Family::ScoreFunction
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
        Ok(Value::Object(self.node.body().clone()))
    }
}

impl ScoreFunctionClause for WeightScoreFunction {}

impl_into_value!(WeightScoreFunction);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::query::TermQuery;

    #[test]
    fn test_weight_with_filter() -> Result<()> {
        let mut function = WeightScoreFunction::new(42);
        function.filter(TermQuery::new("test", "bar"))?;
        assert_eq!(
            function.to_json()?,
            json!({ "weight": 42, "filter": { "term": { "test": "bar" } } })
        );
        Ok(())
    }

    #[test]
    fn test_weight_setter_overwrites() {
        let mut function = WeightScoreFunction::new(1);
        function.weight(2.5);
        assert_eq!(function.to_json().unwrap(), json!({ "weight": 2.5 }));
    }
}
