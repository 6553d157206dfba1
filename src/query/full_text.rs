//! Phrase matching queries on analyzed text.

use crate::error::{BuilderError, Result};
use crate::node::value::impl_into_value;
use crate::node::{Clause, ClauseNode, Family, Value};
use crate::query::query::{QueryClause, field_level_value};

/// Setters shared by `match_phrase` and `match_phrase_prefix`.
pub trait MatchPhraseClause: QueryClause {
    /// Mutable access to the target field.
    fn field_slot(&mut self) -> &mut Option<String>;

    /// Set the document field to query against.
    fn field<F: Into<String>>(&mut self, field: F) -> &mut Self {
        *self.field_slot() = Some(field.into());
        self
    }

    /// Set the query string.
    fn query<S: Into<String>>(&mut self, query: S) -> &mut Self {
        self.node_mut().set_option("query", query.into());
        self
    }

    /// Analyzer used to convert the text into tokens.
    fn analyzer<S: Into<String>>(&mut self, analyzer: S) -> &mut Self {
        self.node_mut().set_option("analyzer", analyzer.into());
        self
    }

    /// Maximum number of intervening unmatched positions.
    fn slop(&mut self, slop: u32) -> &mut Self {
        self.node_mut().set_option("slop", slop);
        self
    }
}

/// Shared serialization: `query` must have been set.
fn mono_field_value(node: &ClauseNode, field: Option<&str>) -> Result<Value> {
    if !node.has_option("query") {
        return Err(BuilderError::missing_keys(
            format!("{} query", node.name()),
            &["query"],
        ));
    }
    Ok(field_level_value(node, field, "query"))
}

/// A query matching the analyzed text as a phrase.
#[derive(Debug, Clone)]
pub struct MatchPhraseQuery {
    node: ClauseNode,
    field: Option<String>,
}

impl MatchPhraseQuery {
    /// Create a new match phrase query.
    pub fn new<F: Into<String>, S: Into<String>>(field: F, query: S) -> Self {
        let mut node = ClauseNode::new("match_phrase");
        node.set_option("query", query.into());
        MatchPhraseQuery {
            node,
            field: Some(field.into()),
        }
    }

    /// Create a match phrase query with no field or query string yet.
    pub fn empty() -> Self {
        MatchPhraseQuery {
            node: ClauseNode::new("match_phrase"),
            field: None,
        }
    }
}

impl Clause for MatchPhraseQuery {
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
        mono_field_value(&self.node, self.field.as_deref())
    }
}

impl QueryClause for MatchPhraseQuery {}

impl MatchPhraseClause for MatchPhraseQuery {
    fn field_slot(&mut self) -> &mut Option<String> {
        &mut self.field
    }
}

/// Like [`MatchPhraseQuery`], but the last term is matched as a prefix.
#[derive(Debug, Clone)]
pub struct MatchPhrasePrefixQuery {
    node: ClauseNode,
    field: Option<String>,
}

impl MatchPhrasePrefixQuery {
    /// Create a new match phrase prefix query.
    pub fn new<F: Into<String>, S: Into<String>>(field: F, query: S) -> Self {
        let mut node = ClauseNode::new("match_phrase_prefix");
        node.set_option("query", query.into());
        MatchPhrasePrefixQuery {
            node,
            field: Some(field.into()),
        }
    }

    /// Create a match phrase prefix query with no field or query string yet.
    pub fn empty() -> Self {
        MatchPhrasePrefixQuery {
            node: ClauseNode::new("match_phrase_prefix"),
            field: None,
        }
    }

    /// Control to how many prefixes the last term will be expanded.
    pub fn max_expansions(&mut self, limit: u32) -> &mut Self {
        self.node.set_option("max_expansions", limit);
        self
    }
}

impl Clause for MatchPhrasePrefixQuery {
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
        mono_field_value(&self.node, self.field.as_deref())
    }
}

impl QueryClause for MatchPhrasePrefixQuery {}

impl MatchPhraseClause for MatchPhrasePrefixQuery {
    fn field_slot(&mut self) -> &mut Option<String> {
        &mut self.field
    }
}

impl_into_value!(MatchPhraseQuery, MatchPhrasePrefixQuery);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_match_phrase_prefix_document() {
        let mut query = MatchPhrasePrefixQuery::new("message", "hello wor");
        query.max_expansions(10);
        assert_eq!(
            query.to_json().unwrap(),
            json!({ "match_phrase_prefix": { "message": { "query": "hello wor", "max_expansions": 10 } } })
        );
    }

    #[test]
    fn test_query_only_collapses() {
        let query = MatchPhraseQuery::new("message", "this is a test");
        assert_eq!(
            query.to_json().unwrap(),
            json!({ "match_phrase": { "message": "this is a test" } })
        );
    }

    #[test]
    fn test_phrase_setters() {
        let mut query = MatchPhraseQuery::empty();
        query
            .field("message")
            .query("quick fox")
            .analyzer("my_analyzer")
            .slop(2)
            .boost(1.5);
        assert_eq!(
            query.to_json().unwrap(),
            json!({
                "match_phrase": {
                    "message": { "query": "quick fox", "analyzer": "my_analyzer", "slop": 2, "boost": 1.5 }
                }
            })
        );
    }

    #[test]
    fn test_missing_query_string_fails_at_serialization() {
        let mut query = MatchPhrasePrefixQuery::empty();
        query.field("message");
        assert!(matches!(
            query.to_json(),
            Err(BuilderError::MissingRequiredKeys { .. })
        ));
    }

    #[test]
    fn test_missing_field_omits_field_level() {
        let mut query = MatchPhrasePrefixQuery::empty();
        query.query("hello").max_expansions(5);
        assert_eq!(
            query.to_json().unwrap(),
            json!({ "match_phrase_prefix": { "query": "hello", "max_expansions": 5 } })
        );
    }
}
