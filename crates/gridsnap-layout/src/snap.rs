//! Edge-snap placement.
//!
//! This module is the only writer of the `closest` / `provides` edge
//! markers on items. A snap is recorded as a pair: the dragged item points
//! at the neighbour edge, and the neighbour points back at the dragged item.

use gridsnap_core::geometry::GridRect;

use crate::config::GridConfig;
use crate::edge::{ClosestEdge, Edge, ProvidedEdge};
use crate::item::{Item, ItemId, ItemLayout};

/// Keep `candidate` only if it lies within `threshold` (inclusive).
#[must_use]
pub fn accept_edge(candidate: Option<ClosestEdge>, threshold: f64) -> Option<ClosestEdge> {
    candidate.filter(|edge| edge.distance <= threshold)
}

/// Clear both markers on every item.
pub fn clear_edge_markers(items: &mut [Item]) {
    for item in items {
        item.edge_link_mut().clear();
    }
}

/// Reset all markers, then record `edge` on `dragged` and the reverse
/// pointer on the edge's owner.
pub(crate) fn link_edge(items: &mut [Item], dragged: ItemId, edge: ClosestEdge) {
    clear_edge_markers(items);
    for item in items.iter_mut() {
        if item.id == dragged {
            item.edge_link_mut().closest = Some(edge);
        } else if item.id == edge.element {
            item.edge_link_mut().provides = Some(ProvidedEdge {
                from: dragged,
                edge: edge.edge,
            });
        }
    }
}

/// Geometry after snapping the dragged item flush against a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapGeometry {
    pub dragged: GridRect,
    pub provider: GridRect,
    /// Both heights were shrunk by the combined-height cap.
    pub height_capped: bool,
}

/// Place `dragged` flush against `edge` of `provider`.
///
/// Left/right snaps align the top edges and, unless `proportional`, copy the
/// provider's height. Top/bottom snaps align the left edges and always copy
/// the provider's width; if the two heights then sum past
/// `max_combined_height`, each shrinks to
/// [`GridConfig::capped_snap_height`] but never below its own `min.h`, and
/// the pair is re-stacked.
#[must_use]
pub fn snap_rect(
    dragged: &ItemLayout,
    provider: &ItemLayout,
    edge: Edge,
    proportional: bool,
    config: &GridConfig,
) -> SnapGeometry {
    let min_height = |layout: &ItemLayout| layout.min.map_or(0, |min| min.h);
    let (dragged_min, provider_min) = (min_height(dragged), min_height(provider));
    let mut dragged = dragged.rect;
    let mut provider = provider.rect;
    match edge {
        Edge::Left => {
            dragged.x = provider.x - dragged.w;
            dragged.y = provider.y;
            if !proportional {
                dragged.h = provider.h;
            }
        }
        Edge::Right => {
            dragged.x = provider.right();
            dragged.y = provider.y;
            if !proportional {
                dragged.h = provider.h;
            }
        }
        Edge::Top => {
            dragged.x = provider.x;
            dragged.y = provider.y - dragged.h;
            dragged.w = provider.w;
        }
        Edge::Bottom => {
            dragged.x = provider.x;
            dragged.y = provider.bottom();
            dragged.w = provider.w;
        }
    }

    let mut height_capped = false;
    if edge.is_vertical() && dragged.h + provider.h > config.max_combined_height {
        let capped = config.capped_snap_height();
        dragged.h = capped.max(dragged_min);
        provider.h = capped.max(provider_min);
        if edge == Edge::Top {
            provider.y = dragged.bottom();
        } else {
            dragged.y = provider.bottom();
        }
        height_capped = true;
    }

    SnapGeometry {
        dragged,
        provider,
        height_capped,
    }
}
