//! Range bucket aggregations: `range`, `date_range` and `ip_range`.
//!
//! Each range entry is a mapping validated when it is added: it must carry
//! at least one of the variant's required keys (`from`/`to`, plus `mask` for
//! IP ranges). An optional `key` labels the bucket.

use log::warn;

use crate::aggregation::{AggregationClause, AggregationNode};
use crate::error::{BuilderError, Result};
use crate::node::consts::{IP_RANGE_REF_URL, RANGE_REF_URL};
use crate::node::value::impl_into_value;
use crate::node::{Clause, ClauseNode, Family, Value, require_one_of};

const RANGE_KEYS: &[&str] = &["from", "to"];
const IP_RANGE_KEYS: &[&str] = &["from", "to", "mask"];

/// State shared by range aggregations.
#[derive(Debug, Clone)]
pub struct RangeAggregationBase {
    agg: AggregationNode,
    required_keys: &'static [&'static str],
}

impl RangeAggregationBase {
    fn new(
        label: String,
        agg_type: &str,
        field: Option<String>,
        required_keys: &'static [&'static str],
    ) -> Self {
        let mut agg = AggregationNode::new(label, agg_type);
        if let Some(field) = field {
            agg.node_mut().set_option("field", field);
        }
        agg.node_mut().set_option("ranges", Value::Array(Vec::new()));
        RangeAggregationBase { agg, required_keys }
    }

    /// Keys of which every range entry needs at least one.
    pub fn required_keys(&self) -> &'static [&'static str] {
        self.required_keys
    }

    /// Validate a range entry without storing it.
    fn check_range(&self, range: Value) -> Result<Value> {
        match &range {
            Value::Object(entry) => {
                if let Err(e) = require_one_of("range", entry, self.required_keys) {
                    warn!("See {RANGE_REF_URL}");
                    return Err(e);
                }
            }
            other => {
                return Err(BuilderError::invalid_argument(format!(
                    "range must be a mapping, got {}",
                    other.describe()
                )));
            }
        }
        Ok(range)
    }

    fn to_value(&self) -> Result<Value> {
        let empty = self
            .agg
            .node()
            .option("ranges")
            .and_then(Value::as_array)
            .is_none_or(|ranges| ranges.is_empty());
        if empty {
            return Err(BuilderError::missing_keys(
                format!("{} aggregation '{}'", self.agg.node().name(), self.agg.label()),
                &["ranges"],
            ));
        }
        self.agg.to_value()
    }
}

/// Setters shared by range aggregations.
pub trait RangeAggregationClause: AggregationClause {
    fn range_base(&self) -> &RangeAggregationBase;

    /// Set the field to aggregate on.
    fn field<F: Into<String>>(&mut self, field: F) -> &mut Self {
        self.node_mut().set_option("field", field.into());
        self
    }

    /// Compute the bucketed values with a script instead of a field.
    fn script<V: Into<Value>>(&mut self, script: V) -> &mut Self {
        self.node_mut().set_option("script", script);
        self
    }

    /// Format of the `from_as_string` / `to_as_string` bucket keys.
    fn format<S: Into<String>>(&mut self, fmt: S) -> Result<&mut Self> {
        self.node_mut().set_option("format", fmt.into());
        Ok(self)
    }

    /// Add a range entry.
    fn range<V: Into<Value>>(&mut self, range: V) -> Result<&mut Self> {
        let range = self.range_base().check_range(range.into())?;
        self.node_mut().push_option("ranges", range);
        Ok(self)
    }

    /// Add several range entries. Fails without storing anything if any
    /// entry is malformed.
    fn ranges<I, V>(&mut self, ranges: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let ranges = ranges
            .into_iter()
            .map(|range| self.range_base().check_range(range.into()))
            .collect::<Result<Vec<_>>>()?;
        for range in ranges {
            self.node_mut().push_option("ranges", range);
        }
        Ok(self)
    }

    /// Value used for documents missing the field.
    fn missing<V: Into<Value>>(&mut self, value: V) -> &mut Self {
        self.node_mut().set_option("missing", value);
        self
    }

    /// Return buckets as a hash keyed by range instead of an array.
    fn keyed(&mut self, keyed: bool) -> &mut Self {
        self.node_mut().set_option("keyed", keyed);
        self
    }
}

macro_rules! impl_range_aggregation {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Clause for $ty {
                fn family(&self) -> Family {
                    Family::Aggregation
                }

                fn node(&self) -> &ClauseNode {
                    self.base.agg.node()
                }

                fn node_mut(&mut self) -> &mut ClauseNode {
                    self.base.agg.node_mut()
                }

                fn clone_box(&self) -> Box<dyn Clause> {
                    Box::new(self.clone())
                }

                fn to_value(&self) -> Result<Value> {
                    self.base.to_value()
                }
            }

            impl AggregationClause for $ty {
                fn aggregation_node(&self) -> &AggregationNode {
                    &self.base.agg
                }

                fn aggregation_node_mut(&mut self) -> &mut AggregationNode {
                    &mut self.base.agg
                }
            }
        )*
        impl_into_value!($($ty),*);
    };
}

/// Buckets documents by user-defined numeric ranges.
#[derive(Debug, Clone)]
pub struct RangeAggregation {
    base: RangeAggregationBase,
}

impl RangeAggregation {
    pub fn new<L: Into<String>>(label: L) -> Self {
        RangeAggregation {
            base: RangeAggregationBase::new(label.into(), "range", None, RANGE_KEYS),
        }
    }

    pub fn with_field<L: Into<String>, F: Into<String>>(label: L, field: F) -> Self {
        RangeAggregation {
            base: RangeAggregationBase::new(label.into(), "range", Some(field.into()), RANGE_KEYS),
        }
    }
}

impl RangeAggregationClause for RangeAggregation {
    fn range_base(&self) -> &RangeAggregationBase {
        &self.base
    }
}

/// Range aggregation over date values; bounds accept date math.
#[derive(Debug, Clone)]
pub struct DateRangeAggregation {
    base: RangeAggregationBase,
}

impl DateRangeAggregation {
    pub fn new<L: Into<String>>(label: L) -> Self {
        DateRangeAggregation {
            base: RangeAggregationBase::new(label.into(), "date_range", None, RANGE_KEYS),
        }
    }

    pub fn with_field<L: Into<String>, F: Into<String>>(label: L, field: F) -> Self {
        DateRangeAggregation {
            base: RangeAggregationBase::new(
                label.into(),
                "date_range",
                Some(field.into()),
                RANGE_KEYS,
            ),
        }
    }

    /// Time zone used to convert date math and bounds, e.g. `"CET"` or `"+01:00"`.
    pub fn time_zone<S: Into<String>>(&mut self, zone: S) -> &mut Self {
        self.base.agg.node_mut().set_option("time_zone", zone.into());
        self
    }
}

impl RangeAggregationClause for DateRangeAggregation {
    fn range_base(&self) -> &RangeAggregationBase {
        &self.base
    }
}

/// Range aggregation for IP typed fields. Entries may use a CIDR `mask`.
#[derive(Debug, Clone)]
pub struct IpRangeAggregation {
    base: RangeAggregationBase,
}

impl IpRangeAggregation {
    pub fn new<L: Into<String>>(label: L) -> Self {
        IpRangeAggregation {
            base: RangeAggregationBase::new(label.into(), "ip_range", None, IP_RANGE_KEYS),
        }
    }

    pub fn with_field<L: Into<String>, F: Into<String>>(label: L, field: F) -> Self {
        IpRangeAggregation {
            base: RangeAggregationBase::new(
                label.into(),
                "ip_range",
                Some(field.into()),
                IP_RANGE_KEYS,
            ),
        }
    }
}

impl RangeAggregationClause for IpRangeAggregation {
    fn range_base(&self) -> &RangeAggregationBase {
        &self.base
    }

    /// IP addresses have no bucket key format; always fails.
    fn format<S: Into<String>>(&mut self, _fmt: S) -> Result<&mut Self> {
        warn!("Please refer {IP_RANGE_REF_URL}");
        Err(BuilderError::unsupported(
            "format is not supported in IpRangeAggregation",
        ))
    }
}

impl_range_aggregation!(RangeAggregation, DateRangeAggregation, IpRangeAggregation);
