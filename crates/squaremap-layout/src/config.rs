//! Layout configuration.

use crate::order::SortOrder;
use crate::tile::TileMethod;
use serde::{Deserialize, Serialize};
use squaremap_core::{Result, TreemapError};

/// The golden ratio, d3's default target aspect ratio for squarify.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Knobs for one [`TreemapLayoutEngine`](crate::TreemapLayoutEngine).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Symmetric inset applied to every node's rect after placement.
    pub padding: f64,
    /// Target aspect ratio for squarify rows; 1.0 aims for squares.
    pub ratio: f64,
    /// Tiling method for each sibling group.
    pub tile: TileMethod,
    /// Sibling ordering applied before tiling.
    pub order: SortOrder,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 0.0,
            ratio: 1.0,
            tile: TileMethod::default(),
            order: SortOrder::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the squarify target ratio.
    #[must_use]
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Set the tiling method.
    #[must_use]
    pub fn with_tile(mut self, tile: TileMethod) -> Self {
        self.tile = tile;
        self
    }

    /// Set the sibling order.
    #[must_use]
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Check ranges: padding must be finite and non-negative, ratio finite and >= 1.
    pub fn validate(&self) -> Result<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(TreemapError::InvalidConfig(format!(
                "padding must be a finite number >= 0, got {}",
                self.padding
            )));
        }
        if !self.ratio.is_finite() || self.ratio < 1.0 {
            return Err(TreemapError::InvalidConfig(format!(
                "ratio must be a finite number >= 1, got {}",
                self.ratio
            )));
        }
        Ok(())
    }
}
