//! Capability and value checks run by setters before they write.

use crate::error::{BuilderError, Result};
use crate::node::{Family, OptionMap, Value};

/// Confirm `value` is a clause of the `expected` family (or a compatible one).
///
/// Scalars, containers and `null` are all rejected.
pub fn check_type(value: &Value, expected: Family) -> Result<()> {
    match value {
        Value::Node(node) if expected.accepts(node.family()) => Ok(()),
        other => Err(BuilderError::type_mismatch(expected, other.describe())),
    }
}

/// Confirm `value` is one of `allowed`.
pub fn check_enum(param: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(BuilderError::invalid_enum(param, value, allowed))
    }
}

/// Confirm `entry` carries at least one of `keys`.
pub fn require_one_of(context: &str, entry: &OptionMap, keys: &[&str]) -> Result<()> {
    if keys.iter().any(|key| entry.contains_key(*key)) {
        Ok(())
    } else {
        Err(BuilderError::missing_keys(context, keys))
    }
}
