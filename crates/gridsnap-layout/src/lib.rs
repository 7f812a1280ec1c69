#![forbid(unsafe_code)]

//! Grid placement and collision engine.
//!
//! Items are integer rectangles with independent geometry per breakpoint.
//! The engine keeps a layout free of overlaps while items are dragged,
//! dropped, snapped against each other's edges and carried between
//! breakpoints.
//!
//! # Building blocks
//! - [`OccupancyMatrix`]: scratch cell → item grid, rebuilt per operation.
//! - [`OccupancyMatrix::find_free_space`] and
//!   [`OccupancyMatrix::shove_along_path`]: nearest free rectangle search
//!   and the displacement heuristic that clears a corridor toward it.
//! - [`find_closest_edge`] and [`find_close_blocks`]: snap target detection.
//! - [`snap_rect`]: flush placement against a neighbour edge.
//! - [`resolve_overlaps`]: bounded horizontal overlap push.
//! - [`adjust`], [`arrange_around`], [`specify_undefined`]: whole-layout
//!   passes.
//!
//! [`GridEngine`] wires these into the drag (`move_item`) and drop
//! (`place_items`) pipeline under a [`GridConfig`]. All operations return a
//! [`LayoutOutcome`] carrying the new item list and any [`LayoutIssue`]s.
//!
//! # Example
//! ```
//! use gridsnap_layout::{BreakpointKey, GridEngine, GridRect, Item, ItemId};
//!
//! let bp = BreakpointKey::new(4);
//! let items = vec![
//!     Item::new(ItemId::new(1)).with_rect(bp, GridRect::new(0, 0, 2, 2)),
//!     Item::new(ItemId::new(2)).with_rect(bp, GridRect::new(1, 1, 2, 2)),
//! ];
//! let outcome = GridEngine::default().adjust(&items, bp);
//! assert!(outcome.is_clean());
//! ```

pub mod config;
pub mod container;
pub mod edge;
pub mod engine;
pub mod free_space;
pub mod item;
pub mod matrix;
pub mod normalize;
pub mod outcome;
pub mod push;
pub mod snap;

pub use gridsnap_core::geometry::{GridPos, GridRect, GridSize};

pub use config::{ConfigError, GridConfig, InteractionModifiers};
pub use container::{col_count, container_height, container_width, row_count};
pub use edge::{ClosestEdge, Edge, EdgeLink, ProvidedEdge, find_close_blocks, find_closest_edge};
pub use engine::GridEngine;
pub use free_space::CellShove;
pub use item::{
    Breakpoint, BreakpointKey, Breakpoints, Item, ItemId, ItemLayout, item_by_id, position_of,
};
pub use matrix::{GridAxis, OccupancyMatrix};
pub use normalize::{adjust, arrange_around, closest_breakpoint, specify_undefined, undefined_items};
pub use outcome::{LayoutIssue, LayoutOutcome};
pub use push::{PushDirection, PushReport, overlapping_pairs, resolve_overlaps};
pub use snap::{SnapGeometry, accept_edge, clear_edge_markers, snap_rect};
