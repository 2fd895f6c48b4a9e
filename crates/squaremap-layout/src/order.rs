//! Sibling ordering applied before tiling.

use serde::{Deserialize, Serialize};
use squaremap_core::HierarchyNode;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How siblings are ordered before they are tiled.
///
/// Ordering only changes where tiles land, never their areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Deepest subtree first, then heaviest.
    #[default]
    HeightThenValue,
    /// Heaviest first.
    Value,
    /// Keep the input order.
    Input,
}

impl SortOrder {
    /// All variants, in documentation order.
    pub const ALL: [Self; 3] = [Self::HeightThenValue, Self::Value, Self::Input];

    /// Compare two siblings; `None` means the order leaves input order alone.
    #[must_use]
    pub fn comparator(self) -> Option<fn(&HierarchyNode, &HierarchyNode) -> Ordering> {
        match self {
            Self::HeightThenValue => Some(by_height_then_value),
            Self::Value => Some(by_value),
            Self::Input => None,
        }
    }

    /// Name as used in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeightThenValue => "height-then-value",
            Self::Value => "value",
            Self::Input => "input",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| {
                format!("unknown order '{s}' (expected height-then-value, value or input)")
            })
    }
}

/// Descending by height, ties broken by descending value.
#[must_use]
pub fn by_height_then_value(a: &HierarchyNode, b: &HierarchyNode) -> Ordering {
    b.height
        .cmp(&a.height)
        .then_with(|| b.value.total_cmp(&a.value))
}

/// Descending by value.
#[must_use]
pub fn by_value(a: &HierarchyNode, b: &HierarchyNode) -> Ordering {
    b.value.total_cmp(&a.value)
}
