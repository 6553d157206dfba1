//! Command implementations for the builder CLI.

use log::{debug, info};

use crate::aggregation::{IpRangeAggregation, RangeAggregation, RangeAggregationClause};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{BuilderError, Result};
use crate::node::{Clause, OptionMap, Value};
use crate::query::{
    MatchPhraseClause, MatchPhrasePrefixQuery, MatchPhraseQuery, QueryClause, SpanNotQuery,
    SpanTermQuery, TermQuery,
};
use crate::score_function::{DecayScoreFunction, FieldValueFactorFunction, ScoreFunctionClause};

/// Execute a CLI command.
pub fn execute_command(args: BuilderArgs) -> Result<()> {
    let document = build_document(&args.command)?;
    output_document(&document, &args)
}

/// Build the plain document for a command.
pub fn build_document(command: &Command) -> Result<serde_json::Value> {
    let clause: Box<dyn Clause> = match command {
        Command::Term(term_args) => Box::new(build_term(term_args)),
        Command::MatchPhrase(phrase_args) => Box::new(build_match_phrase(phrase_args)),
        Command::MatchPhrasePrefix(prefix_args) => Box::new(build_match_phrase_prefix(prefix_args)),
        Command::SpanNot(span_args) => Box::new(build_span_not(span_args)?),
        Command::Decay(decay_args) => Box::new(build_decay(decay_args)?),
        Command::FieldValueFactor(factor_args) => Box::new(build_field_value_factor(factor_args)?),
        Command::Range(range_args) => {
            let mut agg = RangeAggregation::with_field(&range_args.name, &range_args.field);
            apply_range_args(&mut agg, range_args)?;
            Box::new(agg)
        }
        Command::IpRange(range_args) => {
            let mut agg = IpRangeAggregation::with_field(&range_args.name, &range_args.field);
            apply_range_args(&mut agg, range_args)?;
            Box::new(agg)
        }
    };

    info!("Built {} clause '{}'", clause.family(), clause.name());
    clause.to_json()
}

fn build_term(args: &TermArgs) -> TermQuery {
    let mut query = TermQuery::new(&args.field, parse_scalar(&args.value));
    if let Some(boost) = args.boost {
        query.boost(boost);
    }
    query
}

fn apply_phrase_args<Q: MatchPhraseClause>(query: &mut Q, args: &MatchPhraseArgs) {
    if let Some(analyzer) = &args.analyzer {
        query.analyzer(analyzer);
    }
    if let Some(slop) = args.slop {
        query.slop(slop);
    }
}

fn build_match_phrase(args: &MatchPhraseArgs) -> MatchPhraseQuery {
    let mut query = MatchPhraseQuery::new(&args.field, &args.query);
    apply_phrase_args(&mut query, args);
    query
}

fn build_match_phrase_prefix(args: &MatchPhrasePrefixArgs) -> MatchPhrasePrefixQuery {
    let mut query = MatchPhrasePrefixQuery::new(&args.phrase.field, &args.phrase.query);
    apply_phrase_args(&mut query, &args.phrase);
    if let Some(limit) = args.max_expansions {
        query.max_expansions(limit);
    }
    query
}

fn build_span_not(args: &SpanNotArgs) -> Result<SpanNotQuery> {
    let mut query = SpanNotQuery::new();
    query
        .include(parse_span_term(&args.include)?)?
        .exclude(parse_span_term(&args.exclude)?)?;
    if let Some(pre) = args.pre {
        query.pre(pre);
    }
    if let Some(post) = args.post {
        query.post(post);
    }
    if let Some(dist) = args.dist {
        query.dist(dist);
    }
    Ok(query)
}

fn build_decay(args: &DecayArgs) -> Result<DecayScoreFunction> {
    let mut function = DecayScoreFunction::with_mode(&args.mode, &args.field)?;
    if let Some(origin) = &args.origin {
        function.origin(parse_scalar(origin));
    }
    function.scale(parse_scalar(&args.scale));
    if let Some(offset) = &args.offset {
        function.offset(parse_scalar(offset));
    }
    if let Some(decay) = args.decay {
        function.decay(decay);
    }
    if let Some(weight) = args.weight {
        function.weight(weight);
    }
    Ok(function)
}

fn build_field_value_factor(args: &FieldValueFactorArgs) -> Result<FieldValueFactorFunction> {
    let mut function = FieldValueFactorFunction::new(&args.field);
    if let Some(factor) = args.factor {
        function.factor(factor);
    }
    if let Some(modifier) = &args.modifier {
        function.modifier(modifier)?;
    }
    if let Some(missing) = args.missing {
        function.missing(missing);
    }
    Ok(function)
}

fn apply_range_args<A: RangeAggregationClause>(agg: &mut A, args: &RangeArgs) -> Result<()> {
    let ranges = args
        .ranges
        .iter()
        .map(String::as_str)
        .map(parse_range_spec)
        .collect::<Result<Vec<_>>>()?;
    debug!("Parsed {} range entries", ranges.len());
    agg.ranges(ranges)?;
    if let Some(fmt) = &args.key_format {
        agg.format(fmt)?;
    }
    if args.keyed {
        agg.keyed(true);
    }
    Ok(())
}

/// Parse a JSON scalar, falling back to a plain string.
fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) if !json.is_object() && !json.is_array() => Value::from(json),
        _ => Value::from(raw),
    }
}

/// Parse `field:term` into a span term query.
fn parse_span_term(spec: &str) -> Result<SpanTermQuery> {
    let (field, term) = spec.split_once(':').ok_or_else(|| {
        BuilderError::invalid_argument(format!("expected FIELD:TERM, got '{spec}'"))
    })?;
    Ok(SpanTermQuery::new(field, term))
}

/// Parse `from=10,to=20` into a range entry.
fn parse_range_spec(spec: &str) -> Result<OptionMap> {
    let mut entry = OptionMap::new();
    for pair in spec.split(',').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            BuilderError::invalid_argument(format!("expected key=value, got '{pair}'"))
        })?;
        let value = match key {
            // Keys, masks and IP bounds are always strings.
            "key" | "mask" => Value::from(value),
            _ => parse_scalar(value),
        };
        entry.insert(key.trim().to_string(), value);
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use serde_json::json;

    use super::*;

    fn document(argv: &[&str]) -> Result<serde_json::Value> {
        let args = BuilderArgs::parse_from(argv);
        build_document(&args.command)
    }

    #[test]
    fn test_match_phrase_prefix_command() -> Result<()> {
        let doc = document(&[
            "elastic-builder",
            "match-phrase-prefix",
            "--field",
            "message",
            "--query",
            "hello wor",
            "--max-expansions",
            "10",
        ])?;
        assert_eq!(
            doc,
            json!({ "match_phrase_prefix": { "message": { "query": "hello wor", "max_expansions": 10 } } })
        );
        Ok(())
    }

    #[test]
    fn test_span_not_command() -> Result<()> {
        let doc = document(&[
            "elastic-builder",
            "span-not",
            "--include",
            "field1:hoya",
            "--exclude",
            "field1:la",
            "--dist",
            "2",
        ])?;
        assert_eq!(
            doc,
            json!({
                "span_not": {
                    "include": { "span_term": { "field1": "hoya" } },
                    "exclude": { "span_term": { "field1": "la" } },
                    "dist": 2
                }
            })
        );
        Ok(())
    }

    #[test]
    fn test_decay_command_rejects_unknown_mode() {
        let result = document(&[
            "elastic-builder",
            "decay",
            "--mode",
            "cubic",
            "--field",
            "price",
            "--scale",
            "10",
        ]);
        assert!(matches!(result, Err(BuilderError::InvalidEnumValue { .. })));
    }

    #[test]
    fn test_ip_range_command_rejects_format() {
        let result = document(&[
            "elastic-builder",
            "ip-range",
            "--name",
            "ip_ranges",
            "--field",
            "ip",
            "--range",
            "to=10.0.0.5",
            "--key-format",
            "#",
        ]);
        assert!(matches!(result, Err(BuilderError::UnsupportedOperation(_))));
    }

    #[test]
    fn test_range_command() -> Result<()> {
        let doc = document(&[
            "elastic-builder",
            "range",
            "--name",
            "price_ranges",
            "--field",
            "price",
            "--range",
            "to=50",
            "--range",
            "key=mid,from=50,to=100",
            "--keyed",
        ])?;
        assert_eq!(
            doc,
            json!({
                "price_ranges": {
                    "range": {
                        "field": "price",
                        "ranges": [ { "to": 50 }, { "key": "mid", "from": 50, "to": 100 } ],
                        "keyed": true
                    }
                }
            })
        );
        Ok(())
    }

    #[test]
    fn test_parse_scalar() {
        assert!(matches!(parse_scalar("10"), Value::Number(_)));
        assert!(matches!(parse_scalar("true"), Value::Bool(true)));
        assert!(matches!(parse_scalar("now-1h"), Value::String(_)));
        assert!(matches!(parse_scalar("[1]"), Value::String(_)));
    }

    #[test]
    fn test_parse_span_term_requires_colon() {
        assert!(matches!(
            parse_span_term("no-colon"),
            Err(BuilderError::InvalidArgument(_))
        ));
    }
}
