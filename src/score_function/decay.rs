//! Decay score functions: `linear`, `exp` and `gauss`.
//!
//! A decay function scores a document by the distance of a numeric, date or
//! geo field from an origin. The mode is the document key and the field name
//! sits between the mode and the decay options:
//!
//! ```text
//! { "gauss": { "date": { "origin": "2013-09-17", "scale": "10d" } }, "weight": 2 }
//! ```

use log::warn;

use crate::error::{BuilderError, Result};
use crate::node::consts::{DECAY_MODES, DECAY_REF_URL};
use crate::node::value::impl_into_value;
use crate::node::{Clause, ClauseNode, Family, Value, check_enum};
use crate::score_function::{ScoreFunctionClause, score_function_value};

/// Scores documents with a function decaying with distance from an origin.
#[derive(Debug, Clone)]
pub struct DecayScoreFunction {
    node: ClauseNode,
    field: Option<String>,
}

impl DecayScoreFunction {
    /// Create a `gauss` decay function with no field.
    pub fn new() -> Self {
        DecayScoreFunction {
            node: ClauseNode::new("gauss"),
            field: None,
        }
    }

    /// Create a decay function with the given mode and field.
    pub fn with_mode<F: Into<String>>(mode: &str, field: F) -> Result<Self> {
        let mut function = Self::new();
        function.mode(mode)?.field(field);
        Ok(function)
    }

    /// Set the decay mode: `linear`, `exp` or `gauss` (case-insensitive).
    pub fn mode(&mut self, mode: &str) -> Result<&mut Self> {
        let mode_lower = mode.to_lowercase();
        if let Err(e) = check_enum("mode", &mode_lower, DECAY_MODES) {
            warn!("See {DECAY_REF_URL}");
            warn!("Got 'mode' - {mode}");
            return Err(e);
        }
        self.node.set_name(mode_lower);
        Ok(self)
    }

    /// Alias for `mode("linear")`.
    pub fn linear(&mut self) -> &mut Self {
        self.node.set_name("linear");
        self
    }

    /// Alias for `mode("exp")`.
    pub fn exp(&mut self) -> &mut Self {
        self.node.set_name("exp");
        self
    }

    /// Alias for `mode("gauss")`.
    pub fn gauss(&mut self) -> &mut Self {
        self.node.set_name("gauss");
        self
    }

    /// Set the document field to run the decay function against.
    pub fn field<F: Into<String>>(&mut self, field: F) -> &mut Self {
        self.field = Some(field.into());
        self
    }

    /// Get the field name.
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// The point of origin used for calculating distance.
    pub fn origin<V: Into<Value>>(&mut self, origin: V) -> &mut Self {
        self.node.set_option("origin", origin);
        self
    }

    /// Distance from origin + offset at which the score equals `decay`.
    pub fn scale<V: Into<Value>>(&mut self, scale: V) -> &mut Self {
        self.node.set_option("scale", scale);
        self
    }

    /// Only decay documents further than `offset` from the origin.
    pub fn offset<V: Into<Value>>(&mut self, offset: V) -> &mut Self {
        self.node.set_option("offset", offset);
        self
    }

    /// Score given to documents at distance `scale`. Defaults to `0.5`.
    pub fn decay(&mut self, decay: f64) -> &mut Self {
        self.node.set_option("decay", decay);
        self
    }
}

impl Default for DecayScoreFunction {
    fn default() -> Self {
        Self::new()
    }
}

impl Clause for DecayScoreFunction {
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
        let field = self.field.as_deref().ok_or_else(|| {
            BuilderError::missing_keys(format!("{} decay function", self.node.name()), &["field"])
        })?;
        let inner = Value::single(field, Value::Object(self.node.options().clone()));
        Ok(score_function_value(&self.node, inner))
    }
}

impl ScoreFunctionClause for DecayScoreFunction {}

impl_into_value!(DecayScoreFunction);
