//! Bounded overlap-push resolver.
//!
//! After a snap, the dropped item (the *anchor*) may overlap its new
//! neighbours. Each pass sorts items by `x`, finds every overlapping pair and
//! pushes one member horizontally by the x-overlap. Pushes chain: every item
//! further along the sort order on the push side moves by the same delta.
//! The anchor and fixed items never move (normalization also pins static
//! items). If the push would have to move one of them, the other member
//! moves the opposite way instead.
//!
//! Passes are bounded. Hitting the bound with overlaps left is reported via
//! [`PushReport::resolved`], never by looping or panicking.

use rustc_hash::FxHashMap;

use crate::edge::Edge;
use crate::item::{BreakpointKey, Item, ItemId, ItemIndex, ItemLayout};

/// Horizontal push direction implied by the snapped edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushDirection {
    /// Move the later item of a pair further right.
    Right,
    /// Move the earlier item of a pair further left.
    Left,
}

impl PushDirection {
    /// Left-edge snaps push left; every other edge pushes right.
    ///
    /// Top/bottom snaps still push right: the height cap re-stacks the pair
    /// and can drop either one onto items below, which only a horizontal
    /// push clears.
    #[must_use]
    pub const fn for_edge(edge: Edge) -> Self {
        match edge {
            Edge::Left => Self::Left,
            Edge::Right | Edge::Top | Edge::Bottom => Self::Right,
        }
    }
}

/// Result of [`resolve_overlaps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReport {
    /// Passes that found and processed overlaps.
    pub passes: u32,
    pub resolved: bool,
    /// Pairs still overlapping when the resolver stopped.
    pub remaining: Vec<(ItemId, ItemId)>,
}

/// Every overlapping pair at `bp`, by id, in list order (`i < j`).
///
/// Items without geometry at `bp` are ignored.
#[must_use]
pub fn overlapping_pairs(items: &[Item], bp: BreakpointKey) -> Vec<(ItemId, ItemId)> {
    let rects: Vec<_> = items
        .iter()
        .filter_map(|item| item.rect(bp).map(|rect| (item.id, rect)))
        .collect();
    let mut pairs = Vec::new();
    for (i, (first, a)) in rects.iter().enumerate() {
        for (second, b) in &rects[i + 1..] {
            if a.overlaps(b) {
                pairs.push((*first, *second));
            }
        }
    }
    pairs
}

fn sort_by_x(items: &mut [Item], bp: BreakpointKey) {
    items.sort_by_key(|item| item.rect(bp).map_or(i32::MAX, |rect| rect.x));
}

fn shift_x(item: &mut Item, bp: BreakpointKey, delta: i32) {
    if let Some(layout) = item.layout_mut(bp) {
        layout.rect.x += delta;
    }
}

/// Which items a push may not shift.
pub(crate) type PinRule = fn(&ItemLayout) -> bool;

pub(crate) fn pinned_if_fixed(layout: &ItemLayout) -> bool {
    layout.fixed
}

#[derive(Clone, Copy)]
struct Immovable {
    anchor: ItemId,
    rule: PinRule,
}

impl Immovable {
    fn contains(self, item: &Item, bp: BreakpointKey) -> bool {
        item.id == self.anchor || item.layout(bp).is_some_and(self.rule)
    }
}

/// Shift `items[start..]` right by `delta`, skipping immovable items.
fn push_right(items: &mut [Item], bp: BreakpointKey, start: usize, delta: i32, pins: Immovable) {
    for item in &mut items[start..] {
        if !pins.contains(item, bp) {
            shift_x(item, bp, delta);
        }
    }
}

/// Shift `items[..=start]` left by `delta`, skipping immovable items.
fn push_left(items: &mut [Item], bp: BreakpointKey, start: usize, delta: i32, pins: Immovable) {
    for item in items[..=start].iter_mut().rev() {
        if !pins.contains(item, bp) {
            shift_x(item, bp, -delta);
        }
    }
}

/// Shift everything right so no item sits left of column 0.
fn normalize_negative_x(items: &mut [Item], bp: BreakpointKey) {
    let most_negative = items
        .iter()
        .filter_map(|item| item.rect(bp))
        .map(|rect| rect.x)
        .fold(0, i32::min);
    if most_negative < 0 {
        for item in items.iter_mut() {
            shift_x(item, bp, -most_negative);
        }
    }
}

/// Shift everything down so no item sits above row 0.
///
/// Top-edge snaps against an item in row 0 place the dragged item at a
/// negative `y`; the push passes only repair `x`.
pub(crate) fn normalize_negative_y(items: &mut [Item], bp: BreakpointKey) {
    let most_negative = items
        .iter()
        .filter_map(|item| item.rect(bp))
        .map(|rect| rect.y)
        .fold(0, i32::min);
    if most_negative < 0 {
        for item in items.iter_mut() {
            if let Some(layout) = item.layout_mut(bp) {
                layout.rect.y -= most_negative;
            }
        }
    }
}

/// Push items apart horizontally until nothing overlaps or `max_passes` runs out.
///
/// `items` is reordered by `x` while resolving and restored to its input
/// order before returning.
pub fn resolve_overlaps(
    items: &mut Vec<Item>,
    bp: BreakpointKey,
    edge: Edge,
    anchor: ItemId,
    max_passes: u32,
) -> PushReport {
    resolve_overlaps_pinned(items, bp, edge, anchor, max_passes, pinned_if_fixed)
}

/// [`resolve_overlaps`] with a caller-chosen rule for pinned items.
pub(crate) fn resolve_overlaps_pinned(
    items: &mut Vec<Item>,
    bp: BreakpointKey,
    edge: Edge,
    anchor: ItemId,
    max_passes: u32,
    rule: PinRule,
) -> PushReport {
    let pins = Immovable { anchor, rule };
    let direction = PushDirection::for_edge(edge);
    let original_order: Vec<ItemId> = items.iter().map(|item| item.id).collect();
    let mut passes = 0;

    sort_by_x(items, bp);
    while passes < max_passes {
        let pairs = overlapping_pairs(items, bp);
        if pairs.is_empty() {
            break;
        }
        passes += 1;
        tracing::trace!(pass = passes, pairs = pairs.len(), ?direction, "overlap push pass");

        let index = ItemIndex::build(items);
        for (first, second) in pairs {
            let (Some(i), Some(j)) = (index.get(first), index.get(second)) else {
                continue;
            };
            let (Some(a), Some(b)) = (items[i].rect(bp), items[j].rect(bp)) else {
                continue;
            };
            // Earlier pushes in this pass may already have separated them.
            if !a.overlaps(&b) {
                continue;
            }
            let overlap = a.right() - b.x;
            let first_fixed = pins.contains(&items[i], bp);
            let second_fixed = pins.contains(&items[j], bp);
            match (direction, first_fixed, second_fixed) {
                (_, true, true) => {}
                (PushDirection::Right, _, false) | (PushDirection::Left, true, false) => {
                    push_right(items, bp, j, overlap, pins);
                }
                (PushDirection::Left, false, _) | (PushDirection::Right, false, true) => {
                    push_left(items, bp, i, overlap, pins);
                }
            }
        }

        normalize_negative_x(items, bp);
        sort_by_x(items, bp);
    }

    // Snaps can land left of column 0 without overlapping anything.
    normalize_negative_x(items, bp);
    let remaining = overlapping_pairs(items, bp);
    restore_order(items, &original_order);
    PushReport {
        passes,
        resolved: remaining.is_empty(),
        remaining,
    }
}

fn restore_order(items: &mut [Item], order: &[ItemId]) {
    let mut rank: FxHashMap<ItemId, usize> = FxHashMap::default();
    for (idx, id) in order.iter().enumerate() {
        rank.entry(*id).or_insert(idx);
    }
    items.sort_by_key(|item| rank.get(&item.id).copied().unwrap_or(usize::MAX));
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsnap_core::geometry::GridRect;

    const BP: BreakpointKey = BreakpointKey::new(24);

    fn item(raw: u64, x: i32, y: i32, w: i32, h: i32) -> Item {
        Item::new(ItemId::new(raw)).with_rect(BP, GridRect::new(x, y, w, h))
    }

    fn xs(items: &[Item]) -> Vec<i32> {
        items.iter().map(|item| item.rect(BP).map_or(-1, |r| r.x)).collect()
    }

    #[test]
    fn pairs_require_positive_overlap() {
        let items = vec![item(1, 0, 0, 2, 2), item(2, 2, 0, 2, 2), item(3, 1, 1, 2, 2)];
        assert_eq!(
            overlapping_pairs(&items, BP),
            vec![(ItemId::new(1), ItemId::new(3)), (ItemId::new(2), ItemId::new(3))]
        );
    }

    #[test]
    fn right_push_moves_second_item_by_overlap() {
        // Anchor at x=0..4, neighbour starts at 2: overlap of 2.
        let mut items = vec![item(1, 0, 0, 4, 2), item(2, 2, 0, 2, 2)];
        let report = resolve_overlaps(&mut items, BP, Edge::Right, ItemId::new(1), 10);
        assert!(report.resolved);
        assert_eq!(report.passes, 1);
        assert_eq!(xs(&items), vec![0, 4]);
    }

    #[test]
    fn right_push_chains_to_later_items() {
        let mut items = vec![item(1, 0, 0, 4, 2), item(2, 2, 0, 2, 2), item(3, 4, 0, 2, 2)];
        let report = resolve_overlaps(&mut items, BP, Edge::Right, ItemId::new(1), 10);
        assert!(report.resolved);
        assert_eq!(xs(&items), vec![0, 4, 6]);
    }

    #[test]
    fn left_push_moves_first_item_then_renormalizes() {
        // Anchor 2 dropped at x=3 over item 1 (x=2..5): item 1 pushed left by 2
        // to x=0, nothing negative.
        let mut items = vec![item(1, 2, 0, 3, 1), item(2, 3, 0, 2, 1)];
        let report = resolve_overlaps(&mut items, BP, Edge::Left, ItemId::new(2), 10);
        assert!(report.resolved);
        assert_eq!(xs(&items), vec![0, 3]);

        // Same overlap starting at x=0 goes negative and everything shifts back.
        let mut items = vec![item(1, 0, 0, 3, 1), item(2, 1, 0, 2, 1)];
        let report = resolve_overlaps(&mut items, BP, Edge::Left, ItemId::new(2), 10);
        assert!(report.resolved);
        assert_eq!(xs(&items), vec![0, 3]);
    }

    #[test]
    fn anchor_is_never_shifted() {
        // Right snap but the later item of the pair is the anchor: the other
        // member yields leftwards instead.
        let mut items = vec![item(1, 2, 0, 3, 1), item(2, 4, 0, 2, 1)];
        let report = resolve_overlaps(&mut items, BP, Edge::Right, ItemId::new(2), 10);
        assert!(report.resolved);
        assert_eq!(xs(&items), vec![1, 4]);
    }

    #[test]
    fn anchor_over_fixed_item_hits_pass_bound() {
        let mut items = vec![
            Item::new(ItemId::new(1)).with_layout(
                BP,
                crate::item::ItemLayout::new(GridRect::new(0, 0, 3, 3)).with_fixed(true),
            ),
            item(2, 1, 1, 3, 3),
        ];
        let report = resolve_overlaps(&mut items, BP, Edge::Right, ItemId::new(2), 10);
        assert!(!report.resolved);
        assert_eq!(report.passes, 10);
        assert_eq!(report.remaining, vec![(ItemId::new(1), ItemId::new(2))]);
        assert_eq!(xs(&items), vec![0, 1]);
    }

    #[test]
    fn pin_rule_can_hold_static_items() {
        let static_item = Item::new(ItemId::new(2)).with_layout(
            BP,
            crate::item::ItemLayout::new(GridRect::new(2, 0, 2, 2)).with_static(true),
        );
        let mut pushed = vec![item(1, 0, 0, 4, 2), static_item.clone()];
        let report = resolve_overlaps(&mut pushed, BP, Edge::Right, ItemId::new(1), 10);
        assert!(report.resolved);
        assert_eq!(xs(&pushed), vec![0, 4]);

        // Anchor at 0..4 and a pinned static item at 2..4: neither may move.
        let mut held = vec![item(1, 0, 0, 4, 2), static_item];
        let rule: PinRule = |layout| layout.fixed || layout.is_static;
        let report = resolve_overlaps_pinned(&mut held, BP, Edge::Right, ItemId::new(1), 4, rule);
        assert!(!report.resolved);
        assert_eq!(report.passes, 4);
        assert_eq!(xs(&held), vec![0, 2]);
    }

    #[test]
    fn negative_rows_shift_everything_down() {
        let mut items = vec![item(1, 0, -2, 2, 2), item(2, 0, 0, 2, 2)];
        normalize_negative_y(&mut items, BP);
        assert_eq!(items[0].rect(BP), Some(GridRect::new(0, 0, 2, 2)));
        assert_eq!(items[1].rect(BP), Some(GridRect::new(0, 2, 2, 2)));
    }

    #[test]
    fn input_order_is_restored() {
        let mut items = vec![item(9, 5, 0, 1, 1), item(1, 0, 0, 6, 1)];
        let report = resolve_overlaps(&mut items, BP, Edge::Right, ItemId::new(1), 10);
        assert!(report.resolved);
        let ids: Vec<_> = items.iter().map(|item| item.id.get()).collect();
        assert_eq!(ids, vec![9, 1]);
        assert_eq!(xs(&items), vec![6, 0]);
    }
}
