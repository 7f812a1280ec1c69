//! Soft failures and operation results.
//!
//! Nothing in the engine panics or aborts on a degenerate layout. Every
//! higher-level operation returns a [`LayoutOutcome`]: the new item list is
//! always present, and `issues` records what could not be done.

use std::fmt;

use crate::item::{BreakpointKey, Item, ItemId};

/// A recoverable condition reported by a layout operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutIssue {
    /// No free rectangle of the item's size exists; the item kept its
    /// reference position.
    LayoutFull { item: ItemId },
    /// No neighbour edge lies within the snap threshold. Not an error: the
    /// drag simply has no snap target.
    NoEdgeFound { item: ItemId },
    /// A fixed item vetoed the interaction; the layout is unchanged.
    BlockedByFixedItem { item: ItemId, blocker: ItemId },
    /// The overlap push hit its pass bound with overlaps left.
    UnresolvedOverlap {
        passes: u32,
        pairs: Vec<(ItemId, ItemId)>,
    },
    /// No breakpoint defines the item; it was placed from a unit size at
    /// the origin.
    NoDefinedBreakpoint {
        item: ItemId,
        breakpoint: BreakpointKey,
    },
    /// The referenced item is not in the list.
    UnknownItem { item: ItemId },
    /// The item has no geometry at the active breakpoint.
    MissingBreakpoint {
        item: ItemId,
        breakpoint: BreakpointKey,
    },
}

impl fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayoutFull { item } => write!(f, "no free space for item {item}"),
            Self::NoEdgeFound { item } => {
                write!(f, "no neighbour edge within threshold for item {item}")
            }
            Self::BlockedByFixedItem { item, blocker } => {
                write!(f, "item {item} blocked by fixed item {blocker}")
            }
            Self::UnresolvedOverlap { passes, pairs } => write!(
                f,
                "{} overlapping pair(s) left after {passes} push passes",
                pairs.len()
            ),
            Self::NoDefinedBreakpoint { item, breakpoint } => write!(
                f,
                "item {item} has no geometry at any breakpoint (resolving {breakpoint})"
            ),
            Self::UnknownItem { item } => write!(f, "item {item} not found"),
            Self::MissingBreakpoint { item, breakpoint } => {
                write!(f, "item {item} has no geometry at breakpoint {breakpoint}")
            }
        }
    }
}

impl std::error::Error for LayoutIssue {}

/// New item list plus any issues raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    pub items: Vec<Item>,
    pub issues: Vec<LayoutIssue>,
}

impl LayoutOutcome {
    #[must_use]
    pub fn clean(items: Vec<Item>) -> Self {
        Self {
            items,
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_issue(items: Vec<Item>, issue: LayoutIssue) -> Self {
        Self {
            items,
            issues: vec![issue],
        }
    }

    /// True when no issue was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// True when any issue matches `pred`.
    #[must_use]
    pub fn has_issue(&self, pred: impl Fn(&LayoutIssue) -> bool) -> bool {
        self.issues.iter().any(pred)
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}
