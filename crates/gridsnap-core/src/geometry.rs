#![forbid(unsafe_code)]

//! Geometric primitives in grid-cell space.

use serde::{Deserialize, Serialize};

/// A cell coordinate.
///
/// Origin is the top-left cell. Coordinates are signed because the overlap
/// resolver may push an item left of column 0 before renormalizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin cell `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Manhattan (taxicab) distance to another position, saturating at
    /// `u32::MAX`.
    #[inline]
    pub const fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// A width/height pair in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub w: i32,
    pub h: i32,
}

impl GridSize {
    /// Create a new size.
    #[inline]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// The smallest placeable size, one cell.
    pub const UNIT: Self = Self::new(1, 1);

    /// Check if the size covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// An axis-aligned rectangle of grid cells.
///
/// Left/top edges are inclusive, right/bottom edges are exclusive, so the
/// rectangle covers `[x, x + w) × [y, y + h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in cells.
    pub w: i32,
    /// Height in cells.
    pub h: i32,
}

impl GridRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from a position and a size.
    #[inline]
    pub const fn from_parts(pos: GridPos, size: GridSize) -> Self {
        Self::new(pos.x, pos.y, size.w, size.h)
    }

    /// Top-left corner.
    #[inline]
    pub const fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> GridSize {
        GridSize::new(self.w, self.h)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.w as i64 * self.h as i64
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a cell is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether two rectangles share at least one cell.
    ///
    /// Touching edges do not count: both the x-ranges and the y-ranges must
    /// intersect with positive measure.
    #[inline]
    pub const fn overlaps(&self, other: &GridRect) -> bool {
        if self.right() <= other.x || other.right() <= self.x {
            return false;
        }
        if self.bottom() <= other.y || other.bottom() <= self.y {
            return false;
        }
        !self.is_empty() && !other.is_empty()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &GridRect) -> Option<GridRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(GridRect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &GridRect) -> GridRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        GridRect::new(x, y, right - x, bottom - y)
    }

    /// Same size, moved to `pos`.
    #[inline]
    #[must_use]
    pub const fn with_pos(self, pos: GridPos) -> Self {
        Self::new(pos.x, pos.y, self.w, self.h)
    }

    /// Grow by `margin` cells on every side.
    #[inline]
    #[must_use]
    pub const fn expand(self, margin: i32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + 2 * margin,
            self.h + 2 * margin,
        )
    }

    /// Centre point in continuous cell space.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.w) / 2.0,
            f64::from(self.y) + f64::from(self.h) / 2.0,
        )
    }
}
