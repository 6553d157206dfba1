//! Fixed value sets and reference links consulted by validation.

/// Decay function modes.
pub const DECAY_MODES: &[&str] = &["linear", "exp", "gauss"];

/// Modifiers accepted by the `field_value_factor` function.
pub const FIELD_MODIFIERS: &[&str] = &[
    "none",
    "log",
    "log1p",
    "log2p",
    "ln",
    "ln1p",
    "ln2p",
    "square",
    "sqrt",
    "reciprocal",
];

/// How scores of the functions in a `function_score` query are combined.
pub const SCORE_MODES: &[&str] = &["multiply", "sum", "avg", "first", "max", "min"];

/// How the combined function score is merged with the query score.
pub const BOOST_MODES: &[&str] = &["multiply", "replace", "sum", "avg", "max", "min"];

pub const FUNCTION_SCORE_REF_URL: &str =
    "https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-function-score-query.html";

pub const DECAY_REF_URL: &str = "https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-function-score-query.html#function-decay";

pub const FIELD_VALUE_FACTOR_REF_URL: &str = "https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-function-score-query.html#function-field-value-factor";

pub const IP_RANGE_REF_URL: &str = "https://www.elastic.co/guide/en/elasticsearch/reference/current/search-aggregations-bucket-iprange-aggregation.html";

pub const RANGE_REF_URL: &str = "https://www.elastic.co/guide/en/elasticsearch/reference/current/search-aggregations-bucket-range-aggregation.html";
