//! Closest-edge detection between a dragged item and its neighbours.
//!
//! Distances are Euclidean, measured from the dragged rectangle's centre to
//! the midpoint of each neighbour edge. The global minimum wins; ties keep
//! the first candidate in neighbour order, then in [`Edge::ALL`] order.

use std::fmt;

use gridsnap_core::geometry::GridRect;
use serde::{Deserialize, Serialize};

use crate::item::ItemId;
use crate::matrix::OccupancyMatrix;

/// One side of a neighbour rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// Enumeration order; also the tie-break order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Midpoint of this edge of `rect`.
    #[must_use]
    pub fn midpoint(self, rect: GridRect) -> (f64, f64) {
        let x = f64::from(rect.x);
        let y = f64::from(rect.y);
        let w = f64::from(rect.w);
        let h = f64::from(rect.h);
        match self {
            Self::Top => (x + w / 2.0, y),
            Self::Right => (x + w, y + h / 2.0),
            Self::Bottom => (x + w / 2.0, y + h),
            Self::Left => (x, y + h / 2.0),
        }
    }

    /// Whether snapping to this edge stacks items vertically.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// The neighbour edge nearest a dragged item's centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosestEdge {
    #[serde(rename = "type")]
    pub edge: Edge,
    /// The neighbour that owns the edge.
    pub element: ItemId,
    pub distance: f64,
}

/// Reverse pointer stored on the neighbour: who is snapped to it, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidedEdge {
    pub from: ItemId,
    #[serde(rename = "edge_type")]
    pub edge: Edge,
}

/// Both halves of the snap relation as seen from one item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closest: Option<ClosestEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provides: Option<ProvidedEdge>,
}

impl EdgeLink {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closest.is_none() && self.provides.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.closest = None;
        self.provides = None;
    }
}

fn euclidean_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Find the neighbour edge closest to the centre of `dragged`.
///
/// Returns `None` when there are no neighbours.
#[must_use]
pub fn find_closest_edge<I>(dragged: GridRect, neighbors: I) -> Option<ClosestEdge>
where
    I: IntoIterator<Item = (ItemId, GridRect)>,
{
    let center = dragged.center();
    let mut best: Option<ClosestEdge> = None;
    for (element, rect) in neighbors {
        for edge in Edge::ALL {
            let distance = euclidean_distance(center, edge.midpoint(rect));
            match best {
                Some(current) if distance >= current.distance => {}
                _ => {
                    best = Some(ClosestEdge {
                        edge,
                        element,
                        distance,
                    });
                }
            }
        }
    }
    best
}

/// Ids of items whose cells touch or cover `footprint` grown by `margin`.
///
/// `matrix` must already exclude the dragged item. Ids are returned once
/// each, in row-major order of first appearance.
#[must_use]
pub fn find_close_blocks(
    matrix: &OccupancyMatrix,
    footprint: GridRect,
    margin: i32,
) -> Vec<ItemId> {
    let halo = footprint.expand(margin.max(0));
    let mut found: Vec<ItemId> = Vec::new();
    for y in halo.y..halo.bottom() {
        for x in halo.x..halo.right() {
            if let Some(id) = matrix.get(x, y)
                && !found.contains(&id)
            {
                found.push(id);
            }
        }
    }
    found
}
