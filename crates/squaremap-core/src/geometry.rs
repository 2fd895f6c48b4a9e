//! Geometric primitives: Point, Size, Rect.
//!
//! Rectangles use corner coordinates (`x0`, `y0`, `x1`, `y1`) rather than
//! origin plus size, so adjacent tiles can share an edge bit-for-bit.

use serde::{Deserialize, Serialize};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Calculate area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether both sides are finite and strictly positive.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// An axis-aligned rectangle given by its top-left and bottom-right corners.
///
/// Invariant: `x1 >= x0` and `y1 >= y0`. Constructors normalize their
/// arguments so the invariant always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl Rect {
    /// Create a rectangle from its corners.
    ///
    /// Swapped corners are reordered.
    #[must_use]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Create from size at origin.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Get the width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Get the height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Get the size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Get the area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Length of the shorter side.
    #[must_use]
    pub fn short_side(&self) -> f64 {
        self.width().min(self.height())
    }

    /// True when the rectangle has zero width or zero height.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Get center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Check if a point is inside the rectangle (inclusive).
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }

    /// Check if `other` lies entirely within this rectangle, allowing `tolerance`.
    #[must_use]
    pub fn contains_rect(&self, other: &Self, tolerance: f64) -> bool {
        other.x0 >= self.x0 - tolerance
            && other.y0 >= self.y0 - tolerance
            && other.x1 <= self.x1 + tolerance
            && other.y1 <= self.y1 + tolerance
    }

    /// Area of the intersection with another rectangle, zero when disjoint
    /// or touching along an edge.
    #[must_use]
    pub fn overlap_area(&self, other: &Self) -> f64 {
        let w = self.x1.min(other.x1) - self.x0.max(other.x0);
        let h = self.y1.min(other.y1) - self.y0.max(other.y0);
        if w > 0.0 && h > 0.0 {
            w * h
        } else {
            0.0
        }
    }

    /// Calculate the bounding box of this and another rectangle.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Inset by `amount` on all sides.
    ///
    /// An axis narrower than `2 * amount` collapses to zero length at its
    /// midpoint instead of inverting.
    #[must_use]
    pub fn inset(&self, amount: f64) -> Self {
        let (x0, x1) = inset_axis(self.x0, self.x1, amount);
        let (y0, y1) = inset_axis(self.y0, self.y1, amount);
        Self { x0, y0, x1, y1 }
    }

    /// Move every edge inside `bounds`.
    ///
    /// Parts lying outside `bounds` collapse onto its nearest edge.
    #[must_use]
    pub fn clamp_to(&self, bounds: &Self) -> Self {
        Self {
            x0: self.x0.max(bounds.x0).min(bounds.x1),
            y0: self.y0.max(bounds.y0).min(bounds.y1),
            x1: self.x1.max(bounds.x0).min(bounds.x1),
            y1: self.y1.max(bounds.y0).min(bounds.y1),
        }
    }

    /// Approximate equality, for comparing computed geometry.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.x0 - other.x0).abs() <= tolerance
            && (self.y0 - other.y0).abs() <= tolerance
            && (self.x1 - other.x1).abs() <= tolerance
            && (self.y1 - other.y1).abs() <= tolerance
    }
}

fn inset_axis(lo: f64, hi: f64, amount: f64) -> (f64, f64) {
    if hi - lo <= 2.0 * amount {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (lo + amount, hi - amount)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}
