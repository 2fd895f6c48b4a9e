//! JSON input boundary.
//!
//! The dataset is a single JSON object with `name`, optional `category`,
//! `value` and `children` fields, nested to any depth.

use crate::error::{Result, TreemapError};
use crate::node::Node;
use serde_json::Value;
use std::io::Read;

/// Parse a tree from a JSON string.
///
/// A document that is `null` has no root and is rejected with
/// [`TreemapError::MissingRoot`].
pub fn parse_tree(input: &str) -> Result<Node> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

/// Parse a tree from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Node> {
    let value: Value = serde_json::from_reader(reader)?;
    from_value(value)
}

/// Convert an already-parsed JSON value into a tree.
pub fn from_value(value: Value) -> Result<Node> {
    match value {
        Value::Null => Err(TreemapError::MissingRoot),
        Value::Object(_) => {
            let node: Node = serde_json::from_value(value)?;
            log::debug!(
                "parsed tree '{}' with {} nodes",
                node.name,
                node.descendant_count()
            );
            Ok(node)
        }
        other => Err(TreemapError::InvalidValue {
            field: "root".to_string(),
            message: format!("expected an object, found {}", kind(&other)),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
