//! The `function_score` compound query.

use log::warn;

use crate::error::Result;
use crate::node::consts::{BOOST_MODES, FUNCTION_SCORE_REF_URL, SCORE_MODES};
use crate::node::value::impl_into_value;
use crate::node::{Clause, ClauseNode, Family, Value, check_enum, check_type};
use crate::query::query::QueryClause;

/// Modifies the score of documents retrieved by a query with score functions.
#[derive(Debug, Clone)]
pub struct FunctionScoreQuery {
    node: ClauseNode,
}

impl FunctionScoreQuery {
    /// Create a new function score query with an empty function list.
    pub fn new() -> Self {
        let mut node = ClauseNode::new("function_score");
        node.set_option("functions", Value::Array(Vec::new()));
        FunctionScoreQuery { node }
    }

    /// The query whose hits are rescored.
    pub fn query<V: Into<Value>>(&mut self, query: V) -> Result<&mut Self> {
        let query = query.into();
        check_type(&query, Family::Query)?;
        self.node.set_option("query", query);
        Ok(self)
    }

    /// Append a score function.
    pub fn function<V: Into<Value>>(&mut self, function: V) -> Result<&mut Self> {
        let function = function.into();
        check_type(&function, Family::ScoreFunction)?;
        self.node.push_option("functions", function);
        Ok(self)
    }

    /// Append several score functions. Fails without storing anything if any
    /// is not a score function.
    pub fn functions<I, V>(&mut self, functions: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let functions = functions
            .into_iter()
            .map(|function| {
                let function = function.into();
                check_type(&function, Family::ScoreFunction).map(|_| function)
            })
            .collect::<Result<Vec<_>>>()?;
        for function in functions {
            self.node.push_option("functions", function);
        }
        Ok(self)
    }

    /// How the function scores are combined: `multiply`, `sum`, `avg`,
    /// `first`, `max` or `min`.
    pub fn score_mode(&mut self, mode: &str) -> Result<&mut Self> {
        let mode = mode.to_lowercase();
        if let Err(e) = check_enum("score_mode", &mode, SCORE_MODES) {
            warn!("See {FUNCTION_SCORE_REF_URL}");
            return Err(e);
        }
        self.node.set_option("score_mode", mode);
        Ok(self)
    }

    /// How the function score is combined with the query score: `multiply`,
    /// `replace`, `sum`, `avg`, `max` or `min`.
    pub fn boost_mode(&mut self, mode: &str) -> Result<&mut Self> {
        let mode = mode.to_lowercase();
        if let Err(e) = check_enum("boost_mode", &mode, BOOST_MODES) {
            warn!("See {FUNCTION_SCORE_REF_URL}");
            return Err(e);
        }
        self.node.set_option("boost_mode", mode);
        Ok(self)
    }

    /// Cap on the new score.
    pub fn max_boost(&mut self, limit: f64) -> &mut Self {
        self.node.set_option("max_boost", limit);
        self
    }

    /// Exclude documents that do not meet this score threshold.
    pub fn min_score(&mut self, limit: f64) -> &mut Self {
        self.node.set_option("min_score", limit);
        self
    }
}

impl Default for FunctionScoreQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Clause for FunctionScoreQuery {
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
}

impl QueryClause for FunctionScoreQuery {}

impl_into_value!(FunctionScoreQuery);
