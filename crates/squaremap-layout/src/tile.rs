//! Tiling methods: how one sibling group fills one rectangle.
//!
//! Every tiler takes the group's weights in layout order and the cell to
//! fill, and returns one cell per weight. All of them keep areas
//! proportional to weights, never overlap siblings, and snap the last
//! member to the far edge so rounding cannot leave a gap.

use crate::squarify::squarify;
use serde::{Deserialize, Serialize};
use squaremap_core::Rect;
use std::fmt;
use std::str::FromStr;

/// Tiling method for sibling groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileMethod {
    /// Squarified rows, best aspect ratios.
    #[default]
    Squarify,
    /// Stack children top to bottom.
    Slice,
    /// Place children left to right.
    Dice,
    /// Dice at even depths, slice at odd depths.
    SliceDice,
    /// Balanced binary split along the longer side.
    Binary,
}

impl TileMethod {
    /// All variants, in documentation order.
    pub const ALL: [Self; 5] = [
        Self::Squarify,
        Self::Slice,
        Self::Dice,
        Self::SliceDice,
        Self::Binary,
    ];

    /// Name as used in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Squarify => "squarify",
            Self::Slice => "slice",
            Self::Dice => "dice",
            Self::SliceDice => "slice-dice",
            Self::Binary => "binary",
        }
    }

    /// Tile `values` into `cell`. `depth` is the depth of the parent node.
    #[must_use]
    pub fn tile(self, values: &[f64], cell: Rect, depth: usize, ratio: f64) -> Vec<Rect> {
        match self {
            Self::Squarify => squarify(values, cell, ratio),
            Self::Slice => partition(values, cell, Axis::Vertical),
            Self::Dice => partition(values, cell, Axis::Horizontal),
            Self::SliceDice => {
                if depth % 2 == 1 {
                    partition(values, cell, Axis::Vertical)
                } else {
                    partition(values, cell, Axis::Horizontal)
                }
            }
            Self::Binary => binary(values, cell),
        }
    }
}

impl fmt::Display for TileMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| {
                format!("unknown tile method '{s}' (expected squarify, slice, dice, slice-dice or binary)")
            })
    }
}

/// Direction along which members of a strip are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Split `cell` along `axis` in proportion to `values`.
///
/// The last member ends exactly on the far edge. With a zero total every
/// member collapses onto the near edge.
pub(crate) fn partition(values: &[f64], cell: Rect, axis: Axis) -> Vec<Rect> {
    let total: f64 = values.iter().sum();
    let (start, end) = match axis {
        Axis::Horizontal => (cell.x0, cell.x1),
        Axis::Vertical => (cell.y0, cell.y1),
    };
    let extent = end - start;

    let mut out = Vec::with_capacity(values.len());
    let mut offset = start;
    for (i, &value) in values.iter().enumerate() {
        let next = if total <= 0.0 {
            start
        } else if i + 1 == values.len() {
            end
        } else {
            (offset + extent * value / total).min(end)
        };
        out.push(match axis {
            Axis::Horizontal => Rect::new(offset, cell.y0, next, cell.y1),
            Axis::Vertical => Rect::new(cell.x0, offset, cell.x1, next),
        });
        offset = next;
    }
    out
}

/// Recursively split the group at its weighted midpoint.
///
/// Each split cuts the longer side of the current cell, so the result
/// resembles a balanced k-d tree over the siblings.
pub(crate) fn binary(values: &[f64], cell: Rect) -> Vec<Rect> {
    let mut sums = Vec::with_capacity(values.len() + 1);
    sums.push(0.0);
    for &value in values {
        let last = sums[sums.len() - 1];
        sums.push(last + value);
    }

    let mut out = vec![Rect::default(); values.len()];
    if !values.is_empty() {
        split(&sums, 0, values.len(), sums[values.len()], cell, &mut out);
    }
    out
}

fn split(sums: &[f64], i: usize, j: usize, value: f64, cell: Rect, out: &mut [Rect]) {
    if i + 1 >= j {
        out[i] = cell;
        return;
    }

    let offset = sums[i];
    let target = value / 2.0 + offset;
    let mut k = i + 1;
    let mut hi = j - 1;
    while k < hi {
        let mid = (k + hi) / 2;
        if sums[mid] < target {
            k = mid + 1;
        } else {
            hi = mid;
        }
    }
    if target - sums[k - 1] < sums[k] - target && i + 1 < k {
        k -= 1;
    }

    let left = sums[k] - offset;
    let right = value - left;
    if cell.width() > cell.height() {
        let xk = if value > 0.0 {
            (cell.x0 * right + cell.x1 * left) / value
        } else {
            cell.x1
        };
        split(sums, i, k, left, Rect::new(cell.x0, cell.y0, xk, cell.y1), out);
        split(sums, k, j, right, Rect::new(xk, cell.y0, cell.x1, cell.y1), out);
    } else {
        let yk = if value > 0.0 {
            (cell.y0 * right + cell.y1 * left) / value
        } else {
            cell.y1
        };
        split(sums, i, k, left, Rect::new(cell.x0, cell.y0, cell.x1, yk), out);
        split(sums, k, j, right, Rect::new(cell.x0, yk, cell.x1, cell.y1), out);
    }
}
