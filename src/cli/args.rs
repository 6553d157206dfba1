//! Command line argument parsing for the builder CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Elastic Builder - build Elasticsearch query documents from the command line
#[derive(Parser, Debug, Clone)]
#[command(name = "elastic-builder")]
#[command(about = "Build Elasticsearch query and aggregation documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BuilderArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "json", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Write the document to this file instead of stdout
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BuilderArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Exact term query
    Term(TermArgs),

    /// Phrase query
    #[command(name = "match-phrase")]
    MatchPhrase(MatchPhraseArgs),

    /// Phrase query whose last term is a prefix
    #[command(name = "match-phrase-prefix")]
    MatchPhrasePrefix(MatchPhrasePrefixArgs),

    /// Span not query over span terms
    #[command(name = "span-not")]
    SpanNot(SpanNotArgs),

    /// Decay score function
    Decay(DecayArgs),

    /// Field value factor score function
    #[command(name = "field-value-factor")]
    FieldValueFactor(FieldValueFactorArgs),

    /// Numeric range aggregation
    Range(RangeArgs),

    /// IP range aggregation
    #[command(name = "ip-range")]
    IpRange(RangeArgs),
}

/// Arguments for a term query
#[derive(Parser, Debug, Clone)]
pub struct TermArgs {
    /// Field to search in
    #[arg(long)]
    pub field: String,

    /// Exact value (parsed as JSON when possible)
    #[arg(long)]
    pub value: String,

    /// Boost factor
    #[arg(long)]
    pub boost: Option<f64>,
}

/// Arguments for a match phrase query
#[derive(Parser, Debug, Clone)]
pub struct MatchPhraseArgs {
    /// Field to search in
    #[arg(long)]
    pub field: String,

    /// Query text
    #[arg(long)]
    pub query: String,

    /// Analyzer used on the query text
    #[arg(long)]
    pub analyzer: Option<String>,

    /// Allowed distance between terms
    #[arg(long)]
    pub slop: Option<u32>,
}

/// Arguments for a match phrase prefix query
#[derive(Parser, Debug, Clone)]
pub struct MatchPhrasePrefixArgs {
    #[command(flatten)]
    pub phrase: MatchPhraseArgs,

    /// Number of prefixes the last term expands to
    #[arg(long)]
    pub max_expansions: Option<u32>,
}

/// Arguments for a span not query. Spans are given as `field:term`.
#[derive(Parser, Debug, Clone)]
pub struct SpanNotArgs {
    /// Span whose matches are kept
    #[arg(long, value_name = "FIELD:TERM")]
    pub include: String,

    /// Span whose matches must not overlap
    #[arg(long, value_name = "FIELD:TERM")]
    pub exclude: String,

    #[arg(long)]
    pub pre: Option<u32>,

    #[arg(long)]
    pub post: Option<u32>,

    #[arg(long)]
    pub dist: Option<u32>,
}

/// Arguments for a decay score function
#[derive(Parser, Debug, Clone)]
pub struct DecayArgs {
    /// Decay mode: linear, exp or gauss
    #[arg(long, default_value = "gauss")]
    pub mode: String,

    /// Field the decay is computed on
    #[arg(long)]
    pub field: String,

    /// Origin (parsed as JSON when possible)
    #[arg(long)]
    pub origin: Option<String>,

    /// Scale (parsed as JSON when possible)
    #[arg(long)]
    pub scale: String,

    /// Offset (parsed as JSON when possible)
    #[arg(long)]
    pub offset: Option<String>,

    /// Score at distance `scale`
    #[arg(long)]
    pub decay: Option<f64>,

    #[arg(long)]
    pub weight: Option<f64>,
}

/// Arguments for a field value factor score function
#[derive(Parser, Debug, Clone)]
pub struct FieldValueFactorArgs {
    /// Numeric field read from the document
    #[arg(long)]
    pub field: String,

    #[arg(long)]
    pub factor: Option<f64>,

    /// One of none, log, log1p, log2p, ln, ln1p, ln2p, square, sqrt, reciprocal
    #[arg(long)]
    pub modifier: Option<String>,

    /// Value for documents without the field
    #[arg(long)]
    pub missing: Option<f64>,
}

/// Arguments for range aggregations
#[derive(Parser, Debug, Clone)]
pub struct RangeArgs {
    /// Aggregation name
    #[arg(long)]
    pub name: String,

    /// Field to aggregate on
    #[arg(long)]
    pub field: String,

    /// Range entries as comma-separated `key=value` pairs, e.g. `from=10,to=20`
    #[arg(long = "range", value_name = "SPEC", required = true)]
    pub ranges: Vec<String>,

    /// Return buckets keyed by range
    #[arg(long)]
    pub keyed: bool,

    /// Bucket key format
    #[arg(long = "key-format")]
    pub key_format: Option<String>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain JSON document
    Json,
    /// Document preceded by a description
    Human,
}
