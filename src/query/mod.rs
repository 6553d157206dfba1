//! Query clauses.
//!
//! Every query serializes under its query type (`term`, `match_phrase`,
//! `span_not`, ...). Field-level queries nest their options one level deeper,
//! under the field name.

pub mod full_text;
pub mod function_score;
#[allow(clippy::module_inception)]
pub mod query;
pub mod span;
pub mod term;

pub use self::full_text::{MatchPhraseClause, MatchPhrasePrefixQuery, MatchPhraseQuery};
pub use self::function_score::FunctionScoreQuery;
pub use self::query::QueryClause;
pub use self::span::{
    SpanFirstQuery, SpanLittleBigQuery, SpanNearQuery, SpanNotQuery, SpanOrQuery, SpanTermQuery,
};
pub use self::term::TermQuery;
