//! Input tree: the hierarchy exactly as the dataset describes it.

use crate::error::{Result, TreemapError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A node of the input hierarchy.
///
/// Leaves carry a `value`; internal nodes derive their weight from their
/// children, so a `value` on an internal node is kept as metadata only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    /// Optional caller-supplied identifier.
    #[serde(
        default,
        deserialize_with = "optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Category (leaves only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Raw weight (leaves only).
    #[serde(
        default,
        deserialize_with = "optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
    /// Ordered children, empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl Node {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
            ..Self::default()
        }
    }

    /// Create a leaf node belonging to a category.
    #[must_use]
    pub fn categorized(name: &str, category: &str, value: f64) -> Self {
        Self {
            category: Some(category.to_string()),
            ..Self::leaf(name, value)
        }
    }

    /// Create a branch node.
    #[must_use]
    pub fn branch(name: &str, children: Vec<Self>) -> Self {
        Self {
            name: name.to_string(),
            children,
            ..Self::default()
        }
    }

    /// Attach an identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Check if this is a leaf node.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including itself.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Self::descendant_count)
            .sum::<usize>()
    }

    /// Reject negative and non-finite leaf weights.
    ///
    /// Errors name the offending node by its path of names from the root.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(&self.name)
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        if self.is_leaf() {
            if let Some(weight) = self.value {
                if !weight.is_finite() {
                    log::warn!("rejecting non-finite weight at {path}");
                    return Err(TreemapError::NonFiniteWeight {
                        path: path.to_string(),
                    });
                }
                if weight < 0.0 {
                    log::warn!("rejecting negative weight {weight} at {path}");
                    return Err(TreemapError::NegativeWeight {
                        path: path.to_string(),
                        weight,
                    });
                }
            }
            return Ok(());
        }
        for child in &self.children {
            child.validate_at(&format!("{path}/{}", child.name))?;
        }
        Ok(())
    }
}

/// Accepts a number, a numeric string, or null.
///
/// Public datasets frequently quote their numbers (`"value": "4.02"`); an
/// empty string counts as absent.
fn optional_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumberVisitor;

    impl serde::de::Visitor<'_> for NumberVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid numeric value '{v}'")))
        }

        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}

/// Accepts a string or an integer identifier, or null.
fn optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or integer id")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
