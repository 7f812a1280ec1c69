//! Occupancy matrix: which item, if any, claims each grid cell.
//!
//! The matrix is scratch space. Every operation builds (or clones) its own
//! matrix, mutates it while placing items, and throws it away; nothing is
//! shared across calls. Stamping does not validate overlap: a later stamp
//! simply overwrites earlier claims.

use std::fmt;

use gridsnap_core::geometry::GridRect;
use rustc_hash::FxHashSet;

use crate::item::{BreakpointKey, Item, ItemId};

/// Which dimension of the matrix is pinned by the breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Column count is fixed; rows grow to fit.
    Columns,
    /// Row count is fixed; columns grow to fit.
    Rows,
}

/// A `rows × cols` grid of optional item ids.
#[derive(Clone, PartialEq, Eq)]
pub struct OccupancyMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<Option<ItemId>>,
}

impl OccupancyMatrix {
    /// Create an empty matrix.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a matrix from `(id, rect)` pairs, stamped in iteration order.
    #[must_use]
    pub fn from_rects<I>(rows: usize, cols: usize, rects: I) -> Self
    where
        I: IntoIterator<Item = (ItemId, GridRect)>,
    {
        let mut matrix = Self::new(rows, cols);
        for (id, rect) in rects {
            matrix.stamp(id, rect);
        }
        matrix
    }

    /// Build a matrix from the items defined at `bp`, skipping `exclude`.
    #[must_use]
    pub fn from_items(
        items: &[Item],
        bp: BreakpointKey,
        rows: usize,
        cols: usize,
        exclude: &FxHashSet<ItemId>,
    ) -> Self {
        Self::from_rects(
            rows,
            cols,
            items
                .iter()
                .filter(|item| !exclude.contains(&item.id))
                .filter_map(|item| item.rect(bp).map(|rect| (item.id, rect))),
        )
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.cols && y < self.rows).then(|| y * self.cols + x)
    }

    /// Whether `(x, y)` lies inside the matrix.
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Occupant of a cell. Out-of-bounds cells read as empty.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<ItemId> {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Overwrite a cell. Writes outside the matrix are dropped.
    pub fn set(&mut self, x: i32, y: i32, value: Option<ItemId>) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = value;
        }
    }

    /// Claim every in-bounds cell of `rect` for `id`.
    pub fn stamp(&mut self, id: ItemId, rect: GridRect) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, Some(id));
            }
        }
    }

    /// Whether `rect` lies fully inside the matrix and every cell is empty.
    #[must_use]
    pub fn is_region_free(&self, rect: GridRect) -> bool {
        if rect.is_empty() {
            return false;
        }
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                match self.index(x, y) {
                    Some(idx) if self.cells[idx].is_none() => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Append `by` empty rows or columns along the axis that is not pinned.
    pub fn grow(&mut self, axis: GridAxis, by: usize) {
        if by == 0 {
            return;
        }
        match axis {
            GridAxis::Columns => {
                self.rows += by;
                self.cells.resize(self.rows * self.cols, None);
            }
            GridAxis::Rows => {
                let cols = self.cols + by;
                let mut cells = vec![None; self.rows * cols];
                for y in 0..self.rows {
                    let src = &self.cells[y * self.cols..(y + 1) * self.cols];
                    cells[y * cols..y * cols + self.cols].copy_from_slice(src);
                }
                self.cols = cols;
                self.cells = cells;
            }
        }
    }

    /// Distinct occupants in row-major order of first appearance.
    #[must_use]
    pub fn occupants(&self) -> Vec<ItemId> {
        let mut seen = FxHashSet::default();
        self.cells
            .iter()
            .flatten()
            .filter(|id| seen.insert(**id))
            .copied()
            .collect()
    }

    /// Number of cells claimed by `id`.
    #[must_use]
    pub fn cell_count(&self, id: ItemId) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(id)).count()
    }
}

impl fmt::Debug for OccupancyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OccupancyMatrix {}x{}", self.rows, self.cols)?;
        for y in 0..self.rows {
            for x in 0..self.cols {
                match self.cells[y * self.cols + x] {
                    Some(id) => write!(f, "{:>3}", id.get())?,
                    None => f.write_str("  .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BP: BreakpointKey = BreakpointKey::new(4);

    fn id(raw: u64) -> ItemId {
        ItemId::new(raw)
    }

    #[test]
    fn from_items_stamps_footprints_and_skips_excluded() {
        let items = vec![
            Item::new(id(1)).with_rect(BP, GridRect::new(0, 0, 2, 2)),
            Item::new(id(2)).with_rect(BP, GridRect::new(2, 1, 1, 2)),
            Item::new(id(3)),
        ];
        let mut exclude = FxHashSet::default();
        let matrix = OccupancyMatrix::from_items(&items, BP, 3, 4, &exclude);
        assert_eq!(matrix.get(1, 1), Some(id(1)));
        assert_eq!(matrix.get(2, 2), Some(id(2)));
        assert_eq!(matrix.get(3, 0), None);
        assert_eq!(matrix.cell_count(id(1)), 4);

        exclude.insert(id(1));
        let matrix = OccupancyMatrix::from_items(&items, BP, 3, 4, &exclude);
        assert_eq!(matrix.get(0, 0), None);
        assert_eq!(matrix.occupants(), vec![id(2)]);
    }

    #[test]
    fn out_of_bounds_reads_empty_and_writes_drop() {
        let mut matrix = OccupancyMatrix::new(2, 2);
        matrix.stamp(id(9), GridRect::new(-1, -1, 2, 5));
        assert_eq!(matrix.get(0, 0), Some(id(9)));
        assert_eq!(matrix.get(0, 1), Some(id(9)));
        assert_eq!(matrix.get(-1, 0), None);
        assert_eq!(matrix.cell_count(id(9)), 2);
    }

    #[test]
    fn region_free_requires_bounds() {
        let mut matrix = OccupancyMatrix::new(3, 3);
        assert!(matrix.is_region_free(GridRect::new(0, 0, 3, 3)));
        assert!(!matrix.is_region_free(GridRect::new(1, 1, 3, 1)));
        assert!(!matrix.is_region_free(GridRect::new(-1, 0, 1, 1)));
        matrix.stamp(id(1), GridRect::new(2, 2, 1, 1));
        assert!(!matrix.is_region_free(GridRect::new(1, 1, 2, 2)));
    }

    #[test]
    fn grow_preserves_claims_on_both_axes() {
        let mut matrix = OccupancyMatrix::new(2, 2);
        matrix.stamp(id(1), GridRect::new(1, 0, 1, 2));
        matrix.grow(GridAxis::Columns, 2);
        assert_eq!((matrix.rows(), matrix.cols()), (4, 2));
        assert_eq!(matrix.get(1, 1), Some(id(1)));
        assert_eq!(matrix.get(1, 3), None);

        matrix.grow(GridAxis::Rows, 1);
        assert_eq!((matrix.rows(), matrix.cols()), (4, 3));
        assert_eq!(matrix.get(1, 0), Some(id(1)));
        assert_eq!(matrix.get(1, 1), Some(id(1)));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.cell_count(id(1)), 2);
    }
}
