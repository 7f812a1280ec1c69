//! Grid extent and pixel sizing of the hosting container.

use gridsnap_core::geometry::GridRect;

use crate::item::{BreakpointKey, Item};

/// Rows spanned by the items at `bp`: `max(y + h)`, at least 1.
#[must_use]
pub fn row_count(items: &[Item], bp: BreakpointKey) -> usize {
    extent(items, bp, |rect| rect.bottom())
}

/// Columns spanned by the items at `bp`: `max(x + w)`, at least 1.
#[must_use]
pub fn col_count(items: &[Item], bp: BreakpointKey) -> usize {
    extent(items, bp, |rect| rect.right())
}

fn extent(items: &[Item], bp: BreakpointKey, edge: impl Fn(GridRect) -> i32) -> usize {
    items
        .iter()
        .filter_map(|item| item.rect(bp))
        .map(edge)
        .filter_map(|value| usize::try_from(value).ok())
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Container height in pixels.
#[must_use]
pub fn container_height(items: &[Item], bp: BreakpointKey, row_px: u32) -> u64 {
    row_count(items, bp) as u64 * u64::from(row_px)
}

/// Container width in pixels.
#[must_use]
pub fn container_width(items: &[Item], bp: BreakpointKey, col_px: u32) -> u64 {
    col_count(items, bp) as u64 * u64::from(col_px)
}
