//! Nearest-free-rectangle search over an [`OccupancyMatrix`].
//!
//! Placement is split in three visible steps:
//!
//! 1. [`OccupancyMatrix::find_free_space`] is a pure search. Every candidate
//!    rectangle is tested in row-major order; the free one with the smallest
//!    Manhattan distance to the reference wins, first found on ties.
//! 2. [`OccupancyMatrix::shove_along_path`] is the displacement heuristic. It
//!    walks from the reference toward the chosen position and carries any
//!    occupied cell one step further along the walk. It only clears a
//!    corridor in the scratch matrix; it does not compute where displaced
//!    items should really go and can leave them in positions that still need
//!    an overlap pass. Repeated calls on the same matrix may jitter.
//! 3. Stamping the chosen rectangle with the moving item's id.
//!
//! [`OccupancyMatrix::claim_free_space`] runs all three.

use gridsnap_core::geometry::{GridPos, GridRect, GridSize};

use crate::item::ItemId;
use crate::matrix::{GridAxis, OccupancyMatrix};
use crate::outcome::LayoutIssue;

/// One cell relocated by [`OccupancyMatrix::shove_along_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellShove {
    pub item: ItemId,
    pub from: GridPos,
    pub to: GridPos,
}

impl OccupancyMatrix {
    /// Nearest position where a `size` rectangle is fully empty and in bounds.
    ///
    /// Returns `None` when no such rectangle exists (the layout is full).
    #[must_use]
    pub fn find_free_space(&self, size: GridSize, reference: GridPos) -> Option<GridPos> {
        if size.is_empty() {
            return None;
        }
        let max_y = i32::try_from(self.rows()).ok()? - size.h;
        let max_x = i32::try_from(self.cols()).ok()? - size.w;
        let mut best: Option<(u32, GridPos)> = None;
        for y in 0..=max_y {
            for x in 0..=max_x {
                let candidate = GridPos::new(x, y);
                if !self.is_region_free(GridRect::from_parts(candidate, size)) {
                    continue;
                }
                let distance = candidate.manhattan(reference);
                if distance == 0 {
                    return Some(candidate);
                }
                match best {
                    Some((best_distance, _)) if distance >= best_distance => {}
                    _ => best = Some((distance, candidate)),
                }
            }
        }
        best.map(|(_, pos)| pos)
    }

    /// Carry occupied cells out of the way between `from` and `to`.
    ///
    /// Walks rows from `from.y` toward `to.y` (exclusive) and, within each,
    /// columns from `from.x` toward `to.x` (exclusive). An occupied cell is
    /// moved one step further in the walk direction; if that step would leave
    /// the matrix it wraps to the reference coordinate on that axis. Nothing
    /// moves unless both coordinates differ.
    pub fn shove_along_path(&mut self, from: GridPos, to: GridPos) -> Vec<CellShove> {
        let x_dir = if from.x < to.x { 1 } else { -1 };
        let y_dir = if from.y < to.y { 1 } else { -1 };
        let cols = i32::try_from(self.cols()).unwrap_or(i32::MAX);
        let rows = i32::try_from(self.rows()).unwrap_or(i32::MAX);
        let before = |value: i32, target: i32, dir: i32| {
            if dir > 0 { value < target } else { value > target }
        };

        let mut shoves = Vec::new();
        let mut y = from.y;
        while before(y, to.y, y_dir) {
            let mut x = from.x;
            while before(x, to.x, x_dir) {
                if let Some(item) = self.get(x, y) {
                    self.set(x, y, None);
                    let next_x = x + x_dir;
                    let next_y = y + y_dir;
                    let next_x = if (0..cols).contains(&next_x) { next_x } else { from.x };
                    let next_y = if (0..rows).contains(&next_y) { next_y } else { from.y };
                    self.set(next_x, next_y, Some(item));
                    shoves.push(CellShove {
                        item,
                        from: GridPos::new(x, y),
                        to: GridPos::new(next_x, next_y),
                    });
                }
                x += x_dir;
            }
            y += y_dir;
        }
        shoves
    }

    /// Search, shove and stamp in one step.
    ///
    /// Displaced cells are logged at trace level; call
    /// [`shove_along_path`](Self::shove_along_path) directly to inspect them.
    ///
    /// On failure the matrix is left untouched and
    /// [`LayoutIssue::LayoutFull`] is returned; callers that need the
    /// compatible behaviour keep `rect`'s own position.
    pub fn claim_free_space(&mut self, id: ItemId, rect: GridRect) -> Result<GridPos, LayoutIssue> {
        let Some(pos) = self.find_free_space(rect.size(), rect.pos()) else {
            return Err(LayoutIssue::LayoutFull { item: id });
        };
        let shoves = self.shove_along_path(rect.pos(), pos);
        if !shoves.is_empty() {
            tracing::trace!(
                item = id.get(),
                shoved = shoves.len(),
                displaced = ?shoves.iter().map(|shove| shove.item.get()).collect::<Vec<_>>(),
                "claim shoved occupied cells"
            );
        }
        self.stamp(id, GridRect::from_parts(pos, rect.size()));
        Ok(pos)
    }

    /// [`claim_free_space`](Self::claim_free_space), growing the free axis
    /// once when the matrix is full.
    ///
    /// Growth appends exactly enough empty rows (or columns) to hold `rect`,
    /// so the retry succeeds whenever `rect` fits across the pinned axis.
    pub fn claim_with_growth(
        &mut self,
        axis: GridAxis,
        id: ItemId,
        rect: GridRect,
    ) -> Result<GridPos, LayoutIssue> {
        match self.claim_free_space(id, rect) {
            Ok(pos) => Ok(pos),
            Err(issue) => {
                let extra = match axis {
                    GridAxis::Columns => rect.h,
                    GridAxis::Rows => rect.w,
                };
                let Ok(extra) = usize::try_from(extra) else {
                    return Err(issue);
                };
                if extra == 0 {
                    return Err(issue);
                }
                tracing::trace!(item = id.get(), extra, ?axis, "growing matrix to fit item");
                self.grow(axis, extra);
                self.claim_free_space(id, rect)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ItemId {
        ItemId::new(raw)
    }

    #[test]
    fn empty_matrix_places_at_reference() {
        let matrix = OccupancyMatrix::new(4, 4);
        assert_eq!(
            matrix.find_free_space(GridSize::new(2, 2), GridPos::ORIGIN),
            Some(GridPos::new(0, 0))
        );
    }

    #[test]
    fn occupied_reference_moves_to_nearest_in_scan_order() {
        let mut matrix = OccupancyMatrix::new(4, 4);
        matrix.stamp(id(1), GridRect::new(0, 0, 2, 2));
        // (2,0) and (0,2) are both at distance 2; (2,0) is found first.
        assert_eq!(
            matrix.find_free_space(GridSize::new(2, 2), GridPos::ORIGIN),
            Some(GridPos::new(2, 0))
        );
    }

    #[test]
    fn full_matrix_reports_none() {
        let mut matrix = OccupancyMatrix::new(2, 2);
        matrix.stamp(id(1), GridRect::new(0, 0, 1, 1));
        assert_eq!(matrix.find_free_space(GridSize::new(2, 2), GridPos::ORIGIN), None);
        assert_eq!(matrix.find_free_space(GridSize::new(3, 1), GridPos::ORIGIN), None);
        assert_eq!(matrix.find_free_space(GridSize::new(0, 1), GridPos::ORIGIN), None);
    }

    #[test]
    fn candidates_stay_inside_bounds() {
        let matrix = OccupancyMatrix::new(3, 5);
        let pos = matrix
            .find_free_space(GridSize::new(2, 2), GridPos::new(9, 9))
            .expect("room");
        assert_eq!(pos, GridPos::new(3, 1));
    }

    #[test]
    fn shove_requires_movement_on_both_axes() {
        let mut matrix = OccupancyMatrix::new(3, 3);
        matrix.stamp(id(5), GridRect::new(1, 0, 1, 1));
        let shoves = matrix.shove_along_path(GridPos::new(0, 0), GridPos::new(2, 0));
        assert!(shoves.is_empty());
        assert_eq!(matrix.get(1, 0), Some(id(5)));
    }

    #[test]
    fn shove_carries_cells_along_the_walk() {
        let mut matrix = OccupancyMatrix::new(3, 3);
        matrix.stamp(id(5), GridRect::new(0, 0, 1, 1));
        let shoves = matrix.shove_along_path(GridPos::new(0, 0), GridPos::new(2, 2));
        // (0,0) -> (1,1); the walk then reaches (1,1) and carries it to (2,2).
        assert_eq!(
            shoves,
            vec![
                CellShove {
                    item: id(5),
                    from: GridPos::new(0, 0),
                    to: GridPos::new(1, 1),
                },
                CellShove {
                    item: id(5),
                    from: GridPos::new(1, 1),
                    to: GridPos::new(2, 2),
                },
            ]
        );
        assert_eq!(matrix.get(2, 2), Some(id(5)));
        assert_eq!(matrix.cell_count(id(5)), 1);
    }

    #[test]
    fn shove_wraps_to_reference_at_matrix_edge() {
        let mut matrix = OccupancyMatrix::new(2, 2);
        matrix.stamp(id(7), GridRect::new(1, 1, 1, 1));
        // The step past (1,1) leaves the matrix on both axes.
        let shoves = matrix.shove_along_path(GridPos::new(0, 0), GridPos::new(3, 3));
        assert_eq!(shoves.len(), 1);
        assert_eq!(shoves[0].from, GridPos::new(1, 1));
        assert_eq!(shoves[0].to, GridPos::new(0, 0));
        assert_eq!(matrix.get(0, 0), Some(id(7)));
        assert_eq!(matrix.get(1, 1), None);
    }

    #[test]
    fn claim_stamps_chosen_rectangle() {
        let mut matrix = OccupancyMatrix::new(4, 4);
        matrix.stamp(id(1), GridRect::new(0, 0, 2, 2));
        let pos = matrix
            .claim_free_space(id(2), GridRect::new(0, 0, 2, 2))
            .expect("room");
        assert_eq!(pos, GridPos::new(2, 0));
        assert_eq!(matrix.cell_count(id(2)), 4);
        assert_eq!(matrix.get(3, 1), Some(id(2)));
    }

    #[test]
    fn claim_failure_leaves_matrix_untouched() {
        let mut matrix = OccupancyMatrix::new(1, 2);
        matrix.stamp(id(1), GridRect::new(0, 0, 2, 1));
        let before = matrix.clone();
        let err = matrix
            .claim_free_space(id(2), GridRect::new(0, 0, 1, 1))
            .expect_err("full");
        assert_eq!(err, LayoutIssue::LayoutFull { item: id(2) });
        assert_eq!(matrix, before);
    }

    #[test]
    fn growth_makes_room_below() {
        let mut matrix = OccupancyMatrix::new(1, 2);
        matrix.stamp(id(1), GridRect::new(0, 0, 2, 1));
        let pos = matrix
            .claim_with_growth(GridAxis::Columns, id(2), GridRect::new(0, 0, 2, 2))
            .expect("grown");
        assert_eq!(pos, GridPos::new(0, 1));
        assert_eq!(matrix.rows(), 3);

        let mut wide = OccupancyMatrix::new(2, 1);
        wide.stamp(id(1), GridRect::new(0, 0, 1, 2));
        let pos = wide
            .claim_with_growth(GridAxis::Rows, id(2), GridRect::new(0, 0, 1, 1))
            .expect("grown");
        assert_eq!(pos, GridPos::new(1, 0));
    }

    #[test]
    fn growth_cannot_fix_items_wider_than_the_grid() {
        let mut matrix = OccupancyMatrix::new(2, 2);
        let err = matrix
            .claim_with_growth(GridAxis::Columns, id(3), GridRect::new(0, 0, 3, 1))
            .expect_err("too wide");
        assert_eq!(err, LayoutIssue::LayoutFull { item: id(3) });
    }
}
