//! Squarified treemap tiling (Bruls, Huizing & van Wijk).
//!
//! Siblings are consumed in order into rows laid along the shorter side
//! of the remaining cell. A row keeps growing while the worst aspect ratio
//! of its members does not get worse; once it would, the row is emitted,
//! the cell shrinks by the row's share of the area and the next row
//! starts.
//!
//! Orientation: when the remaining cell is at least as wide as it is tall,
//! the row is a column at the left edge and its members stack top to
//! bottom. Otherwise the row is a strip along the top edge and its members
//! go left to right.

use crate::tile::{partition, Axis};
use squaremap_core::Rect;

/// Running statistics for the row being built.
#[derive(Debug, Clone, Copy)]
struct Row {
    sum: f64,
    min: f64,
    max: f64,
}

impl Row {
    fn new(value: f64) -> Self {
        Self::default().with(value)
    }

    /// Zero weights contribute no area, so they never change the worst ratio.
    fn with(self, value: f64) -> Self {
        if value > 0.0 {
            Self {
                sum: self.sum + value,
                min: self.min.min(value),
                max: self.max.max(value),
            }
        } else {
            self
        }
    }

    /// Worst aspect ratio of the row's members.
    ///
    /// `side` is the length the row is laid along and `scale` converts
    /// weight to area. A row with no area is infinitely bad, so the first
    /// weighted member is always accepted.
    fn worst(&self, side: f64, scale: f64, ratio: f64) -> f64 {
        let area = self.sum * scale;
        if area <= 0.0 || side <= 0.0 || self.max <= 0.0 {
            return f64::INFINITY;
        }
        let side_sq = side * side;
        let area_sq = area * area;
        let widest = side_sq * self.max * scale / (area_sq * ratio);
        let narrowest = area_sq * ratio / (side_sq * self.min * scale);
        widest.max(narrowest)
    }
}

impl Default for Row {
    fn default() -> Self {
        Self {
            sum: 0.0,
            min: f64::INFINITY,
            max: 0.0,
        }
    }
}

/// Lay out `values` in `cell` with squarified rows.
///
/// `ratio` is the target aspect ratio of a member (1.0 for squares).
#[must_use]
pub fn squarify(values: &[f64], cell: Rect, ratio: f64) -> Vec<Rect> {
    if values.len() <= 1 {
        return values.iter().map(|_| cell).collect();
    }

    let mut out = Vec::with_capacity(values.len());
    let mut remaining = cell;
    let mut remaining_value: f64 = values.iter().sum();
    let mut start = 0;

    while start < values.len() {
        let side = remaining.short_side();
        let scale = if remaining_value > 0.0 {
            remaining.area() / remaining_value
        } else {
            0.0
        };

        let mut row = Row::new(values[start]);
        let mut worst = row.worst(side, scale, ratio);
        let mut end = start + 1;
        while end < values.len() {
            let candidate = row.with(values[end]);
            let candidate_worst = candidate.worst(side, scale, ratio);
            if candidate_worst > worst {
                break;
            }
            row = candidate;
            worst = candidate_worst;
            end += 1;
        }

        let last = end == values.len();
        let fraction = if last {
            1.0
        } else if remaining_value > 0.0 {
            (row.sum / remaining_value).clamp(0.0, 1.0)
        } else {
            0.0
        };
        log::trace!(
            "squarify row of {} (weight {}, worst ratio {worst:.3}) in {:?}",
            end - start,
            row.sum,
            remaining
        );

        let (strip, rest) = cut_strip(remaining, fraction, last && row.sum > 0.0);
        let axis = if remaining.width() >= remaining.height() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        };
        out.extend(partition(&values[start..end], strip, axis));

        remaining = rest;
        remaining_value = (remaining_value - row.sum).max(0.0);
        start = end;
    }

    out
}

/// Cut a strip holding `fraction` of `cell` off its left edge (wide cells)
/// or top edge (tall cells). Returns the strip and what is left.
///
/// `absorb` makes the strip reach the far edge exactly.
fn cut_strip(cell: Rect, fraction: f64, absorb: bool) -> (Rect, Rect) {
    if cell.width() >= cell.height() {
        let x = if absorb {
            cell.x1
        } else {
            (cell.x0 + cell.width() * fraction).min(cell.x1)
        };
        (
            Rect::new(cell.x0, cell.y0, x, cell.y1),
            Rect::new(x, cell.y0, cell.x1, cell.y1),
        )
    } else {
        let y = if absorb {
            cell.y1
        } else {
            (cell.y0 + cell.height() * fraction).min(cell.y1)
        };
        (
            Rect::new(cell.x0, cell.y0, cell.x1, y),
            Rect::new(cell.x0, y, cell.x1, cell.y1),
        )
    }
}
