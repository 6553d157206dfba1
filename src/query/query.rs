//! Setters and serialization shapes shared by every query.

use crate::node::{Clause, ClauseNode, Value};

/// Fluent setters available on every query clause.
pub trait QueryClause: Clause + Sized {
    /// Set the boost factor for this query.
    fn boost(&mut self, factor: f64) -> &mut Self {
        self.node_mut().set_option("boost", factor);
        self
    }

    /// Name this query so matching hits report it under `matched_queries`.
    fn query_name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.node_mut().set_option("_name", name.into());
        self
    }
}

/// Shape of a query that targets a single field.
///
/// With a field the result is `{ name: { field: options } }`, collapsed to
/// `{ name: { field: shorthand } }` when `shorthand_key` is the only option.
/// Without a field the options sit directly under the name.
pub(crate) fn field_level_value(node: &ClauseNode, field: Option<&str>, shorthand_key: &str) -> Value {
    let options = node.options();
    let inner = match field {
        Some(field) => {
            let field_value = match options.get(shorthand_key) {
                Some(value) if options.len() == 1 => value.clone(),
                _ => Value::Object(options.clone()),
            };
            Value::single(field, field_value)
        }
        None => Value::Object(options.clone()),
    };
    Value::single(node.name(), inner)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::node::to_plain;

    #[test]
    fn test_field_level_shorthand() {
        let mut node = ClauseNode::new("term");
        node.set_option("value", "kimchy");
        let plain = to_plain(&field_level_value(&node, Some("user"), "value")).unwrap();
        assert_eq!(plain, json!({ "term": { "user": "kimchy" } }));
    }

    #[test]
    fn test_field_level_full_options() {
        let mut node = ClauseNode::new("term");
        node.set_option("value", "kimchy");
        node.set_option("boost", 2.0);
        let plain = to_plain(&field_level_value(&node, Some("user"), "value")).unwrap();
        assert_eq!(
            plain,
            json!({ "term": { "user": { "value": "kimchy", "boost": 2.0 } } })
        );
    }

    #[test]
    fn test_field_level_without_field() {
        let mut node = ClauseNode::new("term");
        node.set_option("value", "kimchy");
        let plain = to_plain(&field_level_value(&node, None, "value")).unwrap();
        assert_eq!(plain, json!({ "term": { "value": "kimchy" } }));
    }
}
