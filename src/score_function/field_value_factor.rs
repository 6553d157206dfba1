//! The `field_value_factor` score function.

use log::warn;

use crate::error::Result;
use crate::node::consts::{FIELD_MODIFIERS, FIELD_VALUE_FACTOR_REF_URL};
use crate::node::value::impl_into_value;
use crate::node::{Clause, ClauseNode, Family, Value, check_enum};
use crate::score_function::{ScoreFunctionClause, score_function_value};

/// Uses a numeric document field to influence the score.
///
/// If used on a multi-valued field, only the first value is used.
#[derive(Debug, Clone)]
pub struct FieldValueFactorFunction {
    node: ClauseNode,
}

impl FieldValueFactorFunction {
    /// Create a new function reading `field`.
    pub fn new<F: Into<String>>(field: F) -> Self {
        let mut function = Self::empty();
        function.field(field);
        function
    }

    /// Create a function with no field yet.
    pub fn empty() -> Self {
        FieldValueFactorFunction {
            node: ClauseNode::new("field_value_factor"),
        }
    }

    /// Set the field to be extracted from the document.
    pub fn field<F: Into<String>>(&mut self, field: F) -> &mut Self {
        self.node.set_option("field", field.into());
        self
    }

    /// Factor to multiply the field value with. Defaults to `1`.
    pub fn factor(&mut self, factor: f64) -> &mut Self {
        self.node.set_option("factor", factor);
        self
    }

    /// Modifier to apply to the field value; one of `none`, `log`, `log1p`,
    /// `log2p`, `ln`, `ln1p`, `ln2p`, `square`, `sqrt` or `reciprocal`.
    pub fn modifier(&mut self, modifier: &str) -> Result<&mut Self> {
        if let Err(e) = check_enum("modifier", modifier, FIELD_MODIFIERS) {
            warn!("See {FIELD_VALUE_FACTOR_REF_URL}");
            warn!("Got 'modifier' - {modifier}");
            return Err(e);
        }
        self.node.set_option("modifier", modifier);
        Ok(self)
    }

    /// Value used for documents without the field.
    pub fn missing<V: Into<Value>>(&mut self, value: V) -> &mut Self {
        self.node.set_option("missing", value);
        self
    }
}

impl Clause for FieldValueFactorFunction {
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
        let inner = Value::Object(self.node.options().clone());
        Ok(score_function_value(&self.node, inner))
    }
}

impl ScoreFunctionClause for FieldValueFactorFunction {}

impl_into_value!(FieldValueFactorFunction);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::BuilderError;

    #[test]
    fn test_field_value_factor() -> Result<()> {
        let mut function = FieldValueFactorFunction::new("likes");
        function.factor(1.2).modifier("log1p")?.missing(1).weight(3.0);
        assert_eq!(
            function.to_json()?,
            json!({
                "field_value_factor": { "field": "likes", "factor": 1.2, "modifier": "log1p", "missing": 1 },
                "weight": 3.0
            })
        );
        Ok(())
    }

    #[test]
    fn test_every_modifier_is_accepted() {
        let mut function = FieldValueFactorFunction::new("likes");
        for modifier in FIELD_MODIFIERS {
            assert!(function.modifier(modifier).is_ok());
        }
    }

    #[test]
    fn test_invalid_modifier_leaves_state() {
        let mut function = FieldValueFactorFunction::new("likes");
        match function.modifier("cube") {
            Err(BuilderError::InvalidEnumValue { param, value, allowed }) => {
                assert_eq!(param, "modifier");
                assert_eq!(value, "cube");
                assert_eq!(allowed.len(), 10);
            }
            other => panic!("Expected InvalidEnumValue, got {other:?}"),
        }
        assert_eq!(
            function.to_json().unwrap(),
            json!({ "field_value_factor": { "field": "likes" } })
        );
    }
}
