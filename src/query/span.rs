//! Span queries for positional and proximity-based searching.
//!
//! Span queries only compose with other span queries: every setter taking a
//! nested clause checks its family before storing it, so a misplaced query
//! fails at the call that introduced it.

use crate::error::Result;
use crate::node::value::impl_into_value;
use crate::node::{Clause, ClauseNode, Family, Value, check_type};
use crate::query::query::{QueryClause, field_level_value};

/// Check a span slot value before it is stored.
fn span_value<V: Into<Value>>(value: V) -> Result<Value> {
    let value = value.into();
    check_type(&value, Family::SpanQuery)?;
    Ok(value)
}

/// Check every element of a span clause list before any is stored.
fn span_values<I, V>(clauses: I) -> Result<Vec<Value>>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    clauses.into_iter().map(span_value).collect()
}

macro_rules! impl_span_clause {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Clause for $ty {
                fn family(&self) -> Family {
                    Family::SpanQuery
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

            impl QueryClause for $ty {}
        )*
        impl_into_value!($($ty),*);
    };
}

/// A span query that matches a single term.
#[derive(Debug, Clone)]
pub struct SpanTermQuery {
    node: ClauseNode,
    field: String,
}

impl SpanTermQuery {
    /// Create a new span term query.
    pub fn new<F: Into<String>, V: Into<Value>>(field: F, value: V) -> Self {
        let mut node = ClauseNode::new("span_term");
        node.set_option("value", value);
        SpanTermQuery {
            node,
            field: field.into(),
        }
    }

    /// Get the field name.
    pub fn field_name(&self) -> &str {
        &self.field
    }
}

impl Clause for SpanTermQuery {
    fn family(&self) -> Family {
        Family::SpanQuery
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
        Ok(field_level_value(&self.node, Some(&self.field), "value"))
    }
}

impl QueryClause for SpanTermQuery {}

impl_into_value!(SpanTermQuery);

/// Matches spans which are near one another.
#[derive(Debug, Clone)]
pub struct SpanNearQuery {
    node: ClauseNode,
}

impl SpanNearQuery {
    /// Create a new span near query with no clauses.
    pub fn new() -> Self {
        SpanNearQuery {
            node: ClauseNode::new("span_near"),
        }
    }

    /// Replace the clauses. Fails without storing anything if any is not a span query.
    pub fn clauses<I, V>(&mut self, clauses: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let clauses = span_values(clauses)?;
        self.node.set_option("clauses", Value::Array(clauses));
        Ok(self)
    }

    /// Append a single clause.
    pub fn clause<V: Into<Value>>(&mut self, clause: V) -> Result<&mut Self> {
        let clause = span_value(clause)?;
        self.node.push_option("clauses", clause);
        Ok(self)
    }

    /// Maximum number of intervening unmatched positions.
    pub fn slop(&mut self, slop: u32) -> &mut Self {
        self.node.set_option("slop", slop);
        self
    }

    /// Whether matches are required to be in order.
    pub fn in_order(&mut self, enable: bool) -> &mut Self {
        self.node.set_option("in_order", enable);
        self
    }
}

impl Default for SpanNearQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches the union of its span clauses.
#[derive(Debug, Clone)]
pub struct SpanOrQuery {
    node: ClauseNode,
}

impl SpanOrQuery {
    /// Create a new span or query with no clauses.
    pub fn new() -> Self {
        SpanOrQuery {
            node: ClauseNode::new("span_or"),
        }
    }

    /// Replace the clauses. Fails without storing anything if any is not a span query.
    pub fn clauses<I, V>(&mut self, clauses: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let clauses = span_values(clauses)?;
        self.node.set_option("clauses", Value::Array(clauses));
        Ok(self)
    }

    /// Append a single clause.
    pub fn clause<V: Into<Value>>(&mut self, clause: V) -> Result<&mut Self> {
        let clause = span_value(clause)?;
        self.node.push_option("clauses", clause);
        Ok(self)
    }
}

impl Default for SpanOrQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches spans near the beginning of a field.
#[derive(Debug, Clone)]
pub struct SpanFirstQuery {
    node: ClauseNode,
}

impl SpanFirstQuery {
    pub fn new() -> Self {
        SpanFirstQuery {
            node: ClauseNode::new("span_first"),
        }
    }

    /// Set the `match` clause.
    pub fn match_clause<V: Into<Value>>(&mut self, span_query: V) -> Result<&mut Self> {
        let span_query = span_value(span_query)?;
        self.node.set_option("match", span_query);
        Ok(self)
    }

    /// Maximum end position permitted in a match.
    pub fn end(&mut self, limit: u32) -> &mut Self {
        self.node.set_option("end", limit);
        self
    }
}

impl Default for SpanFirstQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes matches which overlap with another span query.
#[derive(Debug, Clone)]
pub struct SpanNotQuery {
    node: ClauseNode,
}

impl SpanNotQuery {
    pub fn new() -> Self {
        SpanNotQuery {
            node: ClauseNode::new("span_not"),
        }
    }

    /// The span query whose matches are filtered.
    pub fn include<V: Into<Value>>(&mut self, span_query: V) -> Result<&mut Self> {
        let span_query = span_value(span_query)?;
        self.node.set_option("include", span_query);
        Ok(self)
    }

    /// The span query whose matches must not overlap those returned.
    pub fn exclude<V: Into<Value>>(&mut self, span_query: V) -> Result<&mut Self> {
        let span_query = span_value(span_query)?;
        self.node.set_option("exclude", span_query);
        Ok(self)
    }

    /// Tokens before the include span that can't overlap the exclude span.
    pub fn pre(&mut self, pre: u32) -> &mut Self {
        self.node.set_option("pre", pre);
        self
    }

    /// Tokens after the include span that can't overlap the exclude span.
    pub fn post(&mut self, post: u32) -> &mut Self {
        self.node.set_option("post", post);
        self
    }

    /// Equivalent of setting both `pre` and `post`.
    pub fn dist(&mut self, dist: u32) -> &mut Self {
        self.node.set_option("dist", dist);
        self
    }
}

impl Default for SpanNotQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Span query with `little` and `big` clauses: `span_containing` or `span_within`.
#[derive(Debug, Clone)]
pub struct SpanLittleBigQuery {
    node: ClauseNode,
}

impl SpanLittleBigQuery {
    /// Returns matches of `big` which enclose a match of `little`.
    pub fn containing() -> Self {
        SpanLittleBigQuery {
            node: ClauseNode::new("span_containing"),
        }
    }

    /// Returns matches of `little` which are enclosed in a match of `big`.
    pub fn within() -> Self {
        SpanLittleBigQuery {
            node: ClauseNode::new("span_within"),
        }
    }

    /// Set the `little` clause.
    pub fn little<V: Into<Value>>(&mut self, span_query: V) -> Result<&mut Self> {
        let span_query = span_value(span_query)?;
        self.node.set_option("little", span_query);
        Ok(self)
    }

    /// Set the `big` clause.
    pub fn big<V: Into<Value>>(&mut self, span_query: V) -> Result<&mut Self> {
        let span_query = span_value(span_query)?;
        self.node.set_option("big", span_query);
        Ok(self)
    }
}

impl_span_clause!(
    SpanNearQuery,
    SpanOrQuery,
    SpanFirstQuery,
    SpanNotQuery,
    SpanLittleBigQuery,
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::BuilderError;
    use crate::query::TermQuery;

    #[test]
    fn test_span_term() {
        let query = SpanTermQuery::new("user", "kimchy");
        assert_eq!(query.field_name(), "user");
        assert_eq!(query.to_json().unwrap(), json!({ "span_term": { "user": "kimchy" } }));
    }

    #[test]
    fn test_span_near_clauses() -> Result<()> {
        let mut query = SpanNearQuery::new();
        query
            .clauses(vec![
                SpanTermQuery::new("field", "value1"),
                SpanTermQuery::new("field", "value2"),
            ])?
            .clause(SpanTermQuery::new("field", "value3"))?
            .slop(12)
            .in_order(false);

        assert_eq!(
            query.to_json()?,
            json!({
                "span_near": {
                    "clauses": [
                        { "span_term": { "field": "value1" } },
                        { "span_term": { "field": "value2" } },
                        { "span_term": { "field": "value3" } }
                    ],
                    "slop": 12,
                    "in_order": false
                }
            })
        );
        Ok(())
    }

    #[test]
    fn test_span_or_rejects_mixed_list_atomically() -> Result<()> {
        let mut query = SpanOrQuery::new();
        query.clause(SpanTermQuery::new("field", "a"))?;

        let mixed = vec![
            Value::from(SpanTermQuery::new("field", "b")),
            Value::from(TermQuery::new("field", "c")),
        ];
        assert!(matches!(
            query.clauses(mixed),
            Err(BuilderError::TypeMismatch { .. })
        ));
        assert_eq!(
            query.to_json()?,
            json!({ "span_or": { "clauses": [ { "span_term": { "field": "a" } } ] } })
        );
        Ok(())
    }

    #[test]
    fn test_span_first() -> Result<()> {
        let mut query = SpanFirstQuery::new();
        query.match_clause(SpanTermQuery::new("user", "kimchy"))?.end(3);
        assert_eq!(
            query.to_json()?,
            json!({ "span_first": { "match": { "span_term": { "user": "kimchy" } }, "end": 3 } })
        );
        Ok(())
    }

    #[test]
    fn test_span_not() -> Result<()> {
        let mut near = SpanNearQuery::new();
        near.clauses(vec![
            SpanTermQuery::new("field1", "la"),
            SpanTermQuery::new("field1", "hoya"),
        ])?
        .slop(0)
        .in_order(true);

        let mut query = SpanNotQuery::new();
        query
            .include(SpanTermQuery::new("field1", "hoya"))?
            .exclude(near)?
            .pre(1)
            .post(2)
            .dist(3);

        assert_eq!(
            query.to_json()?,
            json!({
                "span_not": {
                    "include": { "span_term": { "field1": "hoya" } },
                    "exclude": {
                        "span_near": {
                            "clauses": [
                                { "span_term": { "field1": "la" } },
                                { "span_term": { "field1": "hoya" } }
                            ],
                            "slop": 0,
                            "in_order": true
                        }
                    },
                    "pre": 1,
                    "post": 2,
                    "dist": 3
                }
            })
        );
        Ok(())
    }

    #[test]
    fn test_span_not_rejects_plain_query() {
        let mut query = SpanNotQuery::new();
        assert!(matches!(
            query.include(TermQuery::new("user", "kimchy")),
            Err(BuilderError::TypeMismatch { .. })
        ));
        assert!(matches!(
            query.exclude(Value::Null),
            Err(BuilderError::TypeMismatch { .. })
        ));
        assert_eq!(query.to_json().unwrap(), json!({ "span_not": {} }));
    }

    #[test]
    fn test_little_big_names() -> Result<()> {
        let mut containing = SpanLittleBigQuery::containing();
        containing
            .little(SpanTermQuery::new("field1", "foo"))?
            .big(SpanTermQuery::new("field1", "bar"))?;
        let mut within = SpanLittleBigQuery::within();
        within.little(SpanTermQuery::new("field1", "foo"))?;

        assert_eq!(
            containing.to_json()?,
            json!({
                "span_containing": {
                    "little": { "span_term": { "field1": "foo" } },
                    "big": { "span_term": { "field1": "bar" } }
                }
            })
        );
        assert_eq!(within.name(), "span_within");
        Ok(())
    }

    #[test]
    fn test_span_queries_accept_boost() {
        let mut query = SpanNotQuery::new();
        query.boost(2.0);
        assert_eq!(query.to_json().unwrap(), json!({ "span_not": { "boost": 2.0 } }));
    }
}
