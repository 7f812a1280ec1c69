#![forbid(unsafe_code)]

//! Core: integer grid geometry shared by the gridsnap engine.
//!
//! # Role in gridsnap
//! `gridsnap-core` owns the cell-space primitives. Everything is measured in
//! whole grid cells; there is no pixel or fractional positioning here. The
//! placement engine (`gridsnap-layout`) builds occupancy matrices, edge
//! detection and overlap repair on top of these types.
//!
//! # Primary types
//! - **GridPos**: a cell coordinate (may be transiently negative while an
//!   overlap push is in flight).
//! - **GridSize**: a width/height pair in cells.
//! - **GridRect**: an axis-aligned rectangle with exclusive right/bottom edges.

pub mod geometry;

pub use geometry::{GridPos, GridRect, GridSize};
