//! Integration tests for recursive serialization of clause trees.

use elastic_builder::prelude::*;
use serde_json::json;

fn contains_no_nodes(value: &Value) -> bool {
    match value {
        Value::Node(_) => false,
        Value::Array(items) => items.iter().all(contains_no_nodes),
        Value::Object(map) => map.values().all(contains_no_nodes),
        _ => true,
    }
}

#[test]
fn test_match_phrase_prefix_end_to_end() -> Result<()> {
    let mut query = MatchPhrasePrefixQuery::new("message", "hello wor");
    query.max_expansions(10);

    let doc = query.to_json()?;
    assert_eq!(
        doc,
        json!({ "match_phrase_prefix": { "message": { "query": "hello wor", "max_expansions": 10 } } })
    );
    assert_eq!(
        serde_json::to_string(&doc)?,
        r#"{"match_phrase_prefix":{"message":{"query":"hello wor","max_expansions":10}}}"#
    );

    Ok(())
}

#[test]
fn test_serialization_is_idempotent() -> Result<()> {
    let mut near = SpanNearQuery::new();
    near.clauses(vec![
        SpanTermQuery::new("body", "quick"),
        SpanTermQuery::new("body", "fox"),
    ])?
    .slop(1);

    let mut query = SpanNotQuery::new();
    query.include(near)?.exclude(SpanTermQuery::new("body", "lazy"))?;

    let first = query.to_json()?;
    let second = query.to_json()?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_deeply_nested_node_is_flattened() -> Result<()> {
    // node -> options mapping -> array -> node -> options -> node
    let mut within = SpanLittleBigQuery::within();
    within
        .little(SpanTermQuery::new("title", "rust"))?
        .big(SpanTermQuery::new("title", "book"))?;

    let mut function = DecayScoreFunction::new();
    function.field("published").origin("now").scale("30d");

    let nested = options! {
        "clauses" => vec![Value::from(within), Value::from(3)],
        "label" => "deep",
    };

    let mut agg = RangeAggregation::with_field("scores", "score");
    agg.range(options! { "from" => 0, "to" => 10 })?
        .meta(options! { "tree" => nested, "function" => function });

    let doc = agg.to_json()?;
    assert_eq!(
        doc,
        json!({
            "scores": {
                "range": { "field": "score", "ranges": [ { "from": 0, "to": 10 } ] },
                "meta": {
                    "tree": {
                        "clauses": [
                            {
                                "span_within": {
                                    "little": { "span_term": { "title": "rust" } },
                                    "big": { "span_term": { "title": "book" } }
                                }
                            },
                            3
                        ],
                        "label": "deep"
                    },
                    "function": { "gauss": { "published": { "origin": "now", "scale": "30d" } } }
                }
            }
        })
    );

    // The one-level structure still holds nodes; the plain document never does.
    let one_level = agg.to_value()?;
    assert!(!contains_no_nodes(&one_level));
    assert!(contains_no_nodes(&Value::from(doc)));

    Ok(())
}

#[test]
fn test_node_stays_mutable_after_serialization() -> Result<()> {
    let mut query = TermQuery::new("user", "kimchy");
    let before = query.to_json()?;
    query.boost(3.0);
    let after = query.to_json()?;

    assert_eq!(before, json!({ "term": { "user": "kimchy" } }));
    assert_eq!(after, json!({ "term": { "user": { "value": "kimchy", "boost": 3.0 } } }));

    Ok(())
}

#[test]
fn test_value_serialize_delegates_to_tree() -> Result<()> {
    let mut query = FunctionScoreQuery::new();
    query
        .query(MatchPhraseQuery::new("title", "rust book"))?
        .function(WeightScoreFunction::new(2))?;

    let text = serde_json::to_string(&Value::from(query))?;
    assert_eq!(
        text,
        r#"{"function_score":{"functions":[{"weight":2}],"query":{"match_phrase":{"title":"rust book"}}}}"#
    );

    Ok(())
}

#[test]
fn test_serialization_error_surfaces_from_nested_node() {
    // A decay function without a field can be nested but not serialized.
    let mut function = DecayScoreFunction::new();
    function.scale(10);

    let mut query = FunctionScoreQuery::new();
    query.function(function).unwrap();

    assert!(matches!(
        query.to_json(),
        Err(BuilderError::MissingRequiredKeys { .. })
    ));
}
