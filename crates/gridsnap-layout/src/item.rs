//! Grid items and their per-breakpoint geometry.
//!
//! An [`Item`] carries one [`ItemLayout`] per [`BreakpointKey`]. A missing
//! entry is meaningful: it marks the item as "not defined for this
//! breakpoint", which the breakpoint resolver later fills in from the
//! nearest breakpoint that does define it.

use std::collections::BTreeMap;
use std::fmt;

use gridsnap_core::geometry::{GridPos, GridRect, GridSize};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::edge::{ClosestEdge, EdgeLink, ProvidedEdge};

/// Stable identifier for grid items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric key of a breakpoint.
///
/// For column layouts this is the column count of the breakpoint; for row
/// layouts it is the row count. Breakpoint distance is the absolute
/// difference between keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointKey(u32);

impl BreakpointKey {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The key as a cell count along the breakpoint's fixed axis.
    #[must_use]
    pub fn cells(self) -> usize {
        self.0 as usize
    }

    /// Absolute key distance, used to pick the nearest defined breakpoint.
    #[must_use]
    pub const fn distance(self, other: BreakpointKey) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for BreakpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named breakpoint, e.g. `("md", 10)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    pub key: BreakpointKey,
}

impl Breakpoint {
    #[must_use]
    pub fn new(name: impl Into<String>, key: u32) -> Self {
        Self {
            name: name.into(),
            key: BreakpointKey::new(key),
        }
    }
}

/// Ordered breakpoint table.
///
/// Order matters: when two breakpoints are equally close to a target key,
/// the one listed first wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakpoints(Vec<Breakpoint>);

impl Breakpoints {
    #[must_use]
    pub fn new(breakpoints: impl IntoIterator<Item = Breakpoint>) -> Self {
        Self(breakpoints.into_iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = BreakpointKey> + '_ {
        self.0.iter().map(|bp| bp.key)
    }

    /// Lookup a breakpoint by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Breakpoint> {
        self.0.iter().find(|bp| bp.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Geometry and flags of an item under one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLayout {
    #[serde(flatten)]
    pub rect: GridRect,
    /// Minimum size. The vertical snap height cap never goes below `min.h`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<GridSize>,
    /// Static items are never moved by [`normalize`](crate::GridEngine::normalize)
    /// or [`adjust`](crate::adjust).
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Fixed items are never displaced and never accept an edge snap.
    #[serde(default)]
    pub fixed: bool,
}

impl ItemLayout {
    #[must_use]
    pub const fn new(rect: GridRect) -> Self {
        Self {
            rect,
            min: None,
            is_static: false,
            fixed: false,
        }
    }

    #[must_use]
    pub const fn with_min(mut self, min: GridSize) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub const fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    #[must_use]
    pub const fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    #[must_use]
    pub const fn pos(&self) -> GridPos {
        self.rect.pos()
    }
}

/// A placed rectangle with per-breakpoint geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    layouts: BTreeMap<BreakpointKey, ItemLayout>,
    #[serde(default, skip_serializing_if = "EdgeLink::is_empty")]
    edge: EdgeLink,
}

impl Item {
    #[must_use]
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            layouts: BTreeMap::new(),
            edge: EdgeLink::default(),
        }
    }

    /// Builder: define geometry for one breakpoint.
    #[must_use]
    pub fn with_layout(mut self, bp: BreakpointKey, layout: ItemLayout) -> Self {
        self.layouts.insert(bp, layout);
        self
    }

    /// Builder shorthand for a plain rectangle.
    #[must_use]
    pub fn with_rect(self, bp: BreakpointKey, rect: GridRect) -> Self {
        self.with_layout(bp, ItemLayout::new(rect))
    }

    /// Geometry at `bp`, or `None` when the item is not defined there.
    #[must_use]
    pub fn layout(&self, bp: BreakpointKey) -> Option<&ItemLayout> {
        self.layouts.get(&bp)
    }

    /// Rectangle at `bp`, if defined.
    #[must_use]
    pub fn rect(&self, bp: BreakpointKey) -> Option<GridRect> {
        self.layouts.get(&bp).map(|layout| layout.rect)
    }

    #[must_use]
    pub fn is_defined(&self, bp: BreakpointKey) -> bool {
        self.layouts.contains_key(&bp)
    }

    pub fn set_layout(&mut self, bp: BreakpointKey, layout: ItemLayout) {
        self.layouts.insert(bp, layout);
    }

    pub fn remove_layout(&mut self, bp: BreakpointKey) -> Option<ItemLayout> {
        self.layouts.remove(&bp)
    }

    /// Breakpoints this item defines geometry for, in key order.
    pub fn breakpoints(&self) -> impl Iterator<Item = BreakpointKey> + '_ {
        self.layouts.keys().copied()
    }

    pub(crate) fn layout_mut(&mut self, bp: BreakpointKey) -> Option<&mut ItemLayout> {
        self.layouts.get_mut(&bp)
    }

    pub(crate) fn set_pos(&mut self, bp: BreakpointKey, pos: GridPos) {
        if let Some(layout) = self.layouts.get_mut(&bp) {
            layout.rect = layout.rect.with_pos(pos);
        }
    }

    /// The edge this item is currently snapped toward.
    #[must_use]
    pub fn closest_edge(&self) -> Option<&ClosestEdge> {
        self.edge.closest.as_ref()
    }

    /// Which item is snapped to this one, and from which edge.
    #[must_use]
    pub fn provides_closest_edge(&self) -> Option<&ProvidedEdge> {
        self.edge.provides.as_ref()
    }

    #[must_use]
    pub fn edge_link(&self) -> &EdgeLink {
        &self.edge
    }

    pub(crate) fn edge_link_mut(&mut self) -> &mut EdgeLink {
        &mut self.edge
    }
}

/// Id → position lookup over an item slice.
#[derive(Debug, Default)]
pub(crate) struct ItemIndex {
    positions: FxHashMap<ItemId, usize>,
}

impl ItemIndex {
    pub(crate) fn build(items: &[Item]) -> Self {
        let mut positions = FxHashMap::default();
        positions.reserve(items.len());
        for (idx, item) in items.iter().enumerate() {
            positions.entry(item.id).or_insert(idx);
        }
        Self { positions }
    }

    pub(crate) fn get(&self, id: ItemId) -> Option<usize> {
        self.positions.get(&id).copied()
    }
}

/// Find the position of an item by id.
#[must_use]
pub fn position_of(items: &[Item], id: ItemId) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// Find an item by id.
#[must_use]
pub fn item_by_id(items: &[Item], id: ItemId) -> Option<&Item> {
    items.iter().find(|item| item.id == id)
}
