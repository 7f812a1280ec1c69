//! Whole-layout passes: compaction, re-flow around a dropped item, and
//! filling in breakpoints an item does not define.
//!
//! Every pass works the same way: build a scratch [`OccupancyMatrix`], claim
//! free space for each item in turn, then rebuild the matrix from the placed
//! items before the next claim. Rebuilding discards whatever the shove step
//! did to cells of items that were not actually moved.

use gridsnap_core::geometry::{GridPos, GridRect, GridSize};
use rustc_hash::FxHashSet;

use crate::container::{col_count, row_count};
use crate::item::{BreakpointKey, Breakpoints, Item, ItemId, ItemLayout, position_of};
use crate::matrix::{GridAxis, OccupancyMatrix};
use crate::outcome::{LayoutIssue, LayoutOutcome};
use crate::push::{PinRule, pinned_if_fixed};

/// Claim space for `rect`, growing the matrix along `axis` when full.
///
/// On failure the item keeps `rect`'s own position, which is the
/// compatible fallback, and the issue is logged.
fn place(
    matrix: &mut OccupancyMatrix,
    axis: GridAxis,
    id: ItemId,
    rect: GridRect,
) -> (GridRect, Option<LayoutIssue>) {
    match matrix.claim_with_growth(axis, id, rect) {
        Ok(pos) => (rect.with_pos(pos), None),
        Err(issue) => {
            tracing::warn!(
                target: "gridsnap.layout",
                item = id.get(),
                w = rect.w,
                h = rect.h,
                rows = matrix.rows(),
                cols = matrix.cols(),
                "no free space; keeping reference position"
            );
            (rect, Some(issue))
        }
    }
}

pub(crate) fn is_pinned(layout: &ItemLayout) -> bool {
    layout.fixed || layout.is_static
}

/// Compact every item at `bp` into a non-overlapping arrangement.
///
/// Static and fixed items keep their positions and are claimed first. The
/// rest are visited in `(x, y)` order and each moves to the free position
/// nearest its current one. The column count is `bp`'s key; rows start at
/// [`row_count`] and grow when an item does not fit.
///
/// The result lists pinned items first, then the others in placement
/// order, then items that have no geometry at `bp`, untouched.
#[must_use]
pub fn adjust(items: &[Item], bp: BreakpointKey) -> LayoutOutcome {
    let cols = bp.cells().max(1);
    let mut matrix = OccupancyMatrix::new(row_count(items, bp), cols);
    let mut placed: Vec<Item> = Vec::with_capacity(items.len());
    let mut issues = Vec::new();

    let (pinned, mut movable): (Vec<&Item>, Vec<&Item>) = items
        .iter()
        .filter(|item| item.is_defined(bp))
        .partition(|item| item.layout(bp).is_some_and(is_pinned));
    movable.sort_by_key(|item| item.rect(bp).map(|rect| (rect.x, rect.y)));

    for item in pinned {
        if let Some(rect) = item.rect(bp) {
            matrix.stamp(item.id, rect);
        }
        placed.push(item.clone());
    }

    let no_exclusions = FxHashSet::default();
    for item in movable {
        let Some(rect) = item.rect(bp) else {
            continue;
        };
        let (rect, issue) = place(&mut matrix, GridAxis::Columns, item.id, rect);
        issues.extend(issue);
        let mut item = item.clone();
        item.set_pos(bp, rect.pos());
        placed.push(item);
        matrix = rebuild(GridAxis::Columns, &placed, bp, dims(&matrix), &no_exclusions);
    }

    placed.extend(items.iter().filter(|item| !item.is_defined(bp)).cloned());
    tracing::debug!(items = placed.len(), rows = matrix.rows(), cols, "adjust complete");
    LayoutOutcome {
        items: placed,
        issues,
    }
}

/// Fresh matrix from `items`, at least `rows × cols`, widened along the
/// free axis to cover every item.
fn rebuild(
    axis: GridAxis,
    items: &[Item],
    bp: BreakpointKey,
    (rows, cols): (usize, usize),
    exclude: &FxHashSet<ItemId>,
) -> OccupancyMatrix {
    let (rows, cols) = match axis {
        GridAxis::Columns => (rows.max(row_count(items, bp)), cols),
        GridAxis::Rows => (rows, cols.max(col_count(items, bp))),
    };
    OccupancyMatrix::from_items(items, bp, rows, cols, exclude)
}

fn dims(matrix: &OccupancyMatrix) -> (usize, usize) {
    (matrix.rows(), matrix.cols())
}

/// Re-flow every other item around `active`, which keeps its geometry.
///
/// `active` is written into the list first. Fixed items stay put; the
/// remaining items are re-placed in list order, each claiming the free
/// space nearest its current position.
#[must_use]
pub fn arrange_around(items: &[Item], active: &Item, bp: BreakpointKey) -> LayoutOutcome {
    arrange_around_pinned(items, active, bp, pinned_if_fixed)
}

/// [`arrange_around`] keeping every item matched by `rule` in place.
pub(crate) fn arrange_around_pinned(
    items: &[Item],
    active: &Item,
    bp: BreakpointKey,
    rule: PinRule,
) -> LayoutOutcome {
    let Some(index) = position_of(items, active.id) else {
        let issue = LayoutIssue::UnknownItem { item: active.id };
        return LayoutOutcome::with_issue(items.to_vec(), issue);
    };
    let Some(active_layout) = active.layout(bp).copied() else {
        return LayoutOutcome::with_issue(
            items.to_vec(),
            LayoutIssue::MissingBreakpoint {
                item: active.id,
                breakpoint: bp,
            },
        );
    };

    let mut result = items.to_vec();
    result[index].set_layout(bp, active_layout);

    // Everything still waiting to be placed is left out of the matrix.
    let mut pending: FxHashSet<ItemId> = result
        .iter()
        .filter(|item| item.id != active.id)
        .filter(|item| item.layout(bp).is_some_and(|layout| !rule(layout)))
        .map(|item| item.id)
        .collect();

    let cols = bp.cells().max(1);
    let mut matrix = rebuild(GridAxis::Columns, &result, bp, (0, cols), &pending);
    let mut issues = Vec::new();

    for idx in 0..result.len() {
        let id = result[idx].id;
        if !pending.contains(&id) {
            continue;
        }
        let Some(rect) = result[idx].rect(bp) else {
            continue;
        };
        let (rect, issue) = place(&mut matrix, GridAxis::Columns, id, rect);
        issues.extend(issue);
        result[idx].set_pos(bp, rect.pos());
        pending.remove(&id);
        matrix = rebuild(GridAxis::Columns, &result, bp, dims(&matrix), &pending);
    }

    LayoutOutcome {
        items: result,
        issues,
    }
}

/// Ids of items with no geometry at `bp`, in list order.
#[must_use]
pub fn undefined_items(items: &[Item], bp: BreakpointKey) -> Vec<ItemId> {
    items
        .iter()
        .filter(|item| !item.is_defined(bp))
        .map(|item| item.id)
        .collect()
}

/// The breakpoint nearest `target` at which `item` has geometry.
///
/// Candidates are taken from `breakpoints` in order; ties keep the first.
#[must_use]
pub fn closest_breakpoint(
    item: &Item,
    target: BreakpointKey,
    breakpoints: &Breakpoints,
) -> Option<BreakpointKey> {
    let mut best: Option<BreakpointKey> = None;
    for key in breakpoints.keys().filter(|key| item.is_defined(*key)) {
        match best {
            Some(current) if key.distance(target) >= current.distance(target) => {}
            _ => best = Some(key),
        }
    }
    best
}

/// Fill in geometry at `bp` for every item that lacks it.
///
/// Each undefined item copies its layout from [`closest_breakpoint`] and is
/// placed at the free position nearest the copied one. The copied size is
/// clamped to the pinned axis (`bp`'s key is the column count for
/// [`GridAxis::Columns`] and the row count for [`GridAxis::Rows`]).
///
/// Items undefined everywhere get a 1×1 cell near the origin and a
/// [`LayoutIssue::NoDefinedBreakpoint`].
#[must_use]
pub fn specify_undefined(
    items: &[Item],
    bp: BreakpointKey,
    breakpoints: &Breakpoints,
    axis: GridAxis,
) -> LayoutOutcome {
    let pinned = bp.cells().max(1);
    let (rows, cols) = match axis {
        GridAxis::Columns => (row_count(items, bp), pinned),
        GridAxis::Rows => (pinned, col_count(items, bp)),
    };
    let pinned = i32::try_from(pinned).unwrap_or(i32::MAX);

    let mut result = items.to_vec();
    let no_exclusions = FxHashSet::default();
    let mut matrix = rebuild(axis, &result, bp, (rows, cols), &no_exclusions);
    let mut issues = Vec::new();

    for idx in 0..result.len() {
        if result[idx].is_defined(bp) {
            continue;
        }
        let id = result[idx].id;
        let source = closest_breakpoint(&result[idx], bp, breakpoints)
            .and_then(|key| result[idx].layout(key).copied());
        let mut layout = match source {
            Some(layout) => layout,
            None => {
                tracing::warn!(
                    target: "gridsnap.layout",
                    item = id.get(),
                    breakpoint = bp.get(),
                    "item defined at no breakpoint; using a unit cell"
                );
                issues.push(LayoutIssue::NoDefinedBreakpoint { item: id, breakpoint: bp });
                ItemLayout::new(GridRect::from_parts(GridPos::ORIGIN, GridSize::UNIT))
            }
        };
        match axis {
            GridAxis::Columns => layout.rect.w = layout.rect.w.min(pinned),
            GridAxis::Rows => layout.rect.h = layout.rect.h.min(pinned),
        }

        let (rect, issue) = place(&mut matrix, axis, id, layout.rect);
        issues.extend(issue);
        layout.rect = rect;
        result[idx].set_layout(bp, layout);
        matrix = rebuild(axis, &result, bp, dims(&matrix), &no_exclusions);
    }

    LayoutOutcome {
        items: result,
        issues,
    }
}
