//! # Elastic Builder
//!
//! A fluent builder for Elasticsearch query and aggregation documents.
//!
//! ## Features
//!
//! - Queries, span queries, score functions and aggregations as composable clauses
//! - Chainable setters that fail at the call breaking a composition rule
//! - Recursive serialization of any clause tree into plain JSON
//! - Insertion-ordered output
//!
//! ```
//! use elastic_builder::prelude::*;
//!
//! let mut query = MatchPhrasePrefixQuery::new("message", "hello wor");
//! query.max_expansions(10);
//!
//! assert_eq!(
//!     query.to_json().unwrap().to_string(),
//!     r#"{"match_phrase_prefix":{"message":{"query":"hello wor","max_expansions":10}}}"#
//! );
//! ```

pub mod aggregation;
pub mod cli;
pub mod node;
pub mod error;
pub mod query;
pub mod score_function;

pub mod prelude {
    pub use crate::aggregation::{
        AggregationClause, DateRangeAggregation, IpRangeAggregation, RangeAggregation,
        RangeAggregationClause,
    };
    pub use crate::node::{Clause, Family, OptionMap, Value, to_plain};
    pub use crate::error::{BuilderError, Result};
    pub use crate::options;
    pub use crate::query::{
        FunctionScoreQuery, MatchPhraseClause, MatchPhrasePrefixQuery, MatchPhraseQuery,
        QueryClause, SpanFirstQuery, SpanLittleBigQuery, SpanNearQuery, SpanNotQuery, SpanOrQuery,
        SpanTermQuery, TermQuery,
    };
    pub use crate::score_function::{
        DecayScoreFunction, FieldValueFactorFunction, ScoreFunctionClause, WeightScoreFunction,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
