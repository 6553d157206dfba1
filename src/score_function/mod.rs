//! Score functions used by the `function_score` query.
//!
//! A score function serializes as `{ name: options, filter: .., weight: .. }`:
//! the function body sits beside the function key rather than inside it.

pub mod decay;
pub mod field_value_factor;
pub mod weight;

pub use self::decay::DecayScoreFunction;
pub use self::field_value_factor::FieldValueFactorFunction;
pub use self::weight::WeightScoreFunction;

use crate::error::Result;
use crate::node::{Clause, ClauseNode, Family, OptionMap, Value, check_type};

/// Setters available on every score function.
pub trait ScoreFunctionClause: Clause + Sized {
    /// Apply this function only to documents matching `query`.
    fn filter<V: Into<Value>>(&mut self, query: V) -> Result<&mut Self> {
        let query = query.into();
        check_type(&query, Family::Query)?;
        self.node_mut().set_body("filter", query);
        Ok(self)
    }

    /// Multiply the function's score by `weight`.
    fn weight(&mut self, weight: f64) -> &mut Self {
        self.node_mut().set_body("weight", weight);
        self
    }
}

/// `{ name: inner, ...body }`
pub(crate) fn score_function_value(node: &ClauseNode, inner: Value) -> Value {
    let mut repr = OptionMap::new();
    repr.insert(node.name().to_string(), inner);
    for (key, value) in node.body() {
        repr.insert(key.clone(), value.clone());
    }
    Value::Object(repr)
}
