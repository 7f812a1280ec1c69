//! The interaction pipeline.
//!
//! [`GridEngine`] ties the primitives together under one [`GridConfig`].
//! A drag is two calls: [`GridEngine::move_item`] on every pointer move
//! (records which neighbour edge the item would snap to), then
//! [`GridEngine::place_items`] on drop (performs the snap and repairs
//! overlaps). Every call takes the current item list by reference and
//! returns a new one; the engine holds no layout state between calls.

use rustc_hash::FxHashSet;

use crate::config::{ConfigError, GridConfig, InteractionModifiers};
use crate::container::row_count;
use crate::edge::{find_close_blocks, find_closest_edge};
use crate::item::{BreakpointKey, Breakpoints, Item, ItemId, item_by_id, position_of};
use crate::matrix::{GridAxis, OccupancyMatrix};
use crate::normalize;
use crate::outcome::{LayoutIssue, LayoutOutcome};
use crate::push::{
    PinRule, normalize_negative_y, overlapping_pairs, pinned_if_fixed, resolve_overlaps_pinned,
};
use crate::snap::{accept_edge, clear_edge_markers, link_edge, snap_rect};

/// Placement and collision engine.
#[derive(Debug, Clone, Default)]
pub struct GridEngine {
    config: GridConfig,
}

impl GridEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Apply a drag step: write `active`'s candidate geometry into the list
    /// and record the neighbour edge it would snap to.
    ///
    /// With the fullscreen modifier the candidate is forced to row 0 at
    /// [`GridConfig::fullscreen_height`]. A fixed item anywhere around the
    /// candidate footprint vetoes the step: the input geometry is kept, all
    /// edge markers are cleared and [`LayoutIssue::BlockedByFixedItem`] is
    /// reported. A fixed `active` item never records a snap.
    #[must_use]
    pub fn move_item(
        &self,
        items: &[Item],
        active: &Item,
        bp: BreakpointKey,
        modifiers: InteractionModifiers,
    ) -> LayoutOutcome {
        let _span = tracing::debug_span!(
            "layout.move_item",
            item = active.id.get(),
            breakpoint = bp.get(),
            fullscreen = modifiers.fullscreen,
        )
        .entered();

        let Some(index) = position_of(items, active.id) else {
            let issue = LayoutIssue::UnknownItem { item: active.id };
            return LayoutOutcome::with_issue(items.to_vec(), issue);
        };
        let Some(mut candidate) = active.layout(bp).copied() else {
            let issue = LayoutIssue::MissingBreakpoint {
                item: active.id,
                breakpoint: bp,
            };
            return LayoutOutcome::with_issue(items.to_vec(), issue);
        };
        if modifiers.fullscreen {
            candidate.rect.y = 0;
            candidate.rect.h = self.config.fullscreen_height;
        }

        let mut result = items.to_vec();
        result[index].set_layout(bp, candidate);

        let mut exclude = FxHashSet::default();
        exclude.insert(active.id);
        let matrix = OccupancyMatrix::from_items(
            &result,
            bp,
            row_count(&result, bp),
            bp.cells().max(1),
            &exclude,
        );
        let close = find_close_blocks(&matrix, candidate.rect, self.config.close_block_margin);

        if let Some(blocker) = close.iter().copied().find(|id| {
            item_by_id(&result, *id)
                .and_then(|item| item.layout(bp))
                .is_some_and(|layout| layout.fixed)
        }) {
            tracing::debug!(
                item = active.id.get(),
                blocker = blocker.get(),
                "move vetoed by fixed item"
            );
            let mut unchanged = items.to_vec();
            clear_edge_markers(&mut unchanged);
            return LayoutOutcome::with_issue(
                unchanged,
                LayoutIssue::BlockedByFixedItem {
                    item: active.id,
                    blocker,
                },
            );
        }

        let neighbors = close.iter().filter_map(|id| {
            item_by_id(&result, *id)
                .and_then(|item| item.rect(bp))
                .map(|rect| (*id, rect))
        });
        let nearest = find_closest_edge(candidate.rect, neighbors);
        let accepted = accept_edge(nearest, self.config.edge_distance_threshold)
            .filter(|_| !candidate.fixed);

        match accepted {
            Some(edge) => {
                tracing::debug!(
                    item = active.id.get(),
                    element = edge.element.get(),
                    edge = %edge.edge,
                    distance = edge.distance,
                    "snap edge recorded"
                );
                link_edge(&mut result, active.id, edge);
                LayoutOutcome::clean(result)
            }
            None => {
                tracing::trace!(
                    item = active.id.get(),
                    nearest = ?nearest.map(|edge| edge.distance),
                    threshold = self.config.edge_distance_threshold,
                    "no snap edge"
                );
                clear_edge_markers(&mut result);
                LayoutOutcome::with_issue(result, LayoutIssue::NoEdgeFound { item: active.id })
            }
        }
    }

    /// Drop step: snap `active` against the edge recorded by
    /// [`move_item`](Self::move_item), push overlapping items apart and
    /// clear every edge marker.
    ///
    /// Without a recorded edge the list is returned unchanged with
    /// [`LayoutIssue::NoEdgeFound`]. If either side of the snap is fixed the
    /// geometry is unchanged and the markers are cleared. When the push
    /// passes run out with overlaps left, the layout is returned as-is with
    /// [`LayoutIssue::UnresolvedOverlap`].
    #[must_use]
    pub fn place_items(
        &self,
        items: &[Item],
        active: ItemId,
        bp: BreakpointKey,
        modifiers: InteractionModifiers,
    ) -> LayoutOutcome {
        let _span = tracing::debug_span!(
            "layout.place_items",
            item = active.get(),
            breakpoint = bp.get(),
            proportional = modifiers.proportional,
        )
        .entered();
        self.drop_snapped(items, active, bp, modifiers, pinned_if_fixed)
    }

    fn drop_snapped(
        &self,
        items: &[Item],
        active: ItemId,
        bp: BreakpointKey,
        modifiers: InteractionModifiers,
        pins: PinRule,
    ) -> LayoutOutcome {
        let Some(dragged) = item_by_id(items, active) else {
            let issue = LayoutIssue::UnknownItem { item: active };
            return LayoutOutcome::with_issue(items.to_vec(), issue);
        };
        let Some(dragged_layout) = dragged.layout(bp).copied() else {
            let issue = LayoutIssue::MissingBreakpoint {
                item: active,
                breakpoint: bp,
            };
            return LayoutOutcome::with_issue(items.to_vec(), issue);
        };
        let Some(edge) = dragged.closest_edge().copied() else {
            let issue = LayoutIssue::NoEdgeFound { item: active };
            return LayoutOutcome::with_issue(items.to_vec(), issue);
        };

        let mut result = items.to_vec();
        let provider_layout =
            item_by_id(items, edge.element).and_then(|item| item.layout(bp).copied());
        let Some(provider_layout) = provider_layout else {
            clear_edge_markers(&mut result);
            let issue = LayoutIssue::UnknownItem { item: edge.element };
            return LayoutOutcome::with_issue(result, issue);
        };
        if dragged_layout.fixed || provider_layout.fixed {
            let blocker = if dragged_layout.fixed { active } else { edge.element };
            tracing::debug!(
                item = active.get(),
                blocker = blocker.get(),
                "snap vetoed by fixed item"
            );
            clear_edge_markers(&mut result);
            return LayoutOutcome::with_issue(
                result,
                LayoutIssue::BlockedByFixedItem {
                    item: active,
                    blocker,
                },
            );
        }

        let snapped = snap_rect(
            &dragged_layout,
            &provider_layout,
            edge.edge,
            modifiers.proportional,
            &self.config,
        );
        tracing::debug!(
            item = active.get(),
            element = edge.element.get(),
            edge = %edge.edge,
            height_capped = snapped.height_capped,
            "snapped"
        );
        for item in &mut result {
            let rect = if item.id == active {
                snapped.dragged
            } else if item.id == edge.element && !pins(&provider_layout) {
                snapped.provider
            } else {
                continue;
            };
            if let Some(layout) = item.layout_mut(bp) {
                layout.rect = rect;
            }
        }

        let passes = self.config.max_push_passes;
        let report = resolve_overlaps_pinned(&mut result, bp, edge.edge, active, passes, pins);
        normalize_negative_y(&mut result, bp);
        clear_edge_markers(&mut result);

        if report.resolved {
            tracing::debug!(passes = report.passes, "overlaps resolved");
            LayoutOutcome::clean(result)
        } else {
            tracing::warn!(
                target: "gridsnap.layout",
                item = active.get(),
                passes = report.passes,
                remaining = report.remaining.len(),
                "overlap push hit its pass bound"
            );
            LayoutOutcome::with_issue(
                result,
                LayoutIssue::UnresolvedOverlap {
                    passes: report.passes,
                    pairs: report.remaining,
                },
            )
        }
    }

    /// Compact the whole layout. See [`normalize::adjust`].
    #[must_use]
    pub fn adjust(&self, items: &[Item], bp: BreakpointKey) -> LayoutOutcome {
        let _span =
            tracing::debug_span!("layout.adjust", breakpoint = bp.get(), items = items.len())
                .entered();
        normalize::adjust(items, bp)
    }

    /// Self-heal pass: settle every non-static item in list order.
    ///
    /// Each item goes through the drag pipeline at its own geometry. If it
    /// finds a snap edge it is dropped against it, and everything not pinned
    /// is then re-flowed around it. Static and fixed items never move. Edge
    /// markers are cleared on return. Only issues about the final layout are
    /// reported: a missing snap target is the normal case, and overlaps left
    /// between pinned items come back as [`LayoutIssue::UnresolvedOverlap`]
    /// with `passes` set to the number of items settled.
    #[must_use]
    pub fn normalize(&self, items: &[Item], bp: BreakpointKey) -> LayoutOutcome {
        let _span =
            tracing::debug_span!("layout.normalize", breakpoint = bp.get(), items = items.len())
                .entered();
        let mut current = items.to_vec();
        clear_edge_markers(&mut current);
        let mut issues = Vec::new();
        let mut settled = 0;
        let ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
        for id in ids {
            let Some(item) = item_by_id(&current, id) else {
                continue;
            };
            if item.layout(bp).is_none_or(|layout| layout.is_static) {
                continue;
            }
            let active = item.clone();
            let moved = self.move_item(&current, &active, bp, InteractionModifiers::none());
            let snapped =
                item_by_id(&moved.items, id).is_some_and(|item| item.closest_edge().is_some());
            let mut placed = if snapped {
                let modifiers = InteractionModifiers::none();
                self.drop_snapped(&moved.items, id, bp, modifiers, normalize::is_pinned)
                    .items
            } else {
                moved.items
            };
            clear_edge_markers(&mut placed);

            let Some(active) = item_by_id(&placed, id).cloned() else {
                continue;
            };
            let arranged =
                normalize::arrange_around_pinned(&placed, &active, bp, normalize::is_pinned);
            issues.extend(arranged.issues);
            current = arranged.items;
            settled += 1;
        }

        let remaining = overlapping_pairs(&current, bp);
        if !remaining.is_empty() {
            tracing::warn!(
                target: "gridsnap.layout",
                settled,
                remaining = remaining.len(),
                "normalize left pinned items overlapping"
            );
            issues.push(LayoutIssue::UnresolvedOverlap {
                passes: settled,
                pairs: remaining,
            });
        }
        LayoutOutcome {
            items: current,
            issues,
        }
    }

    /// Keep `active` at its new geometry and re-place everything else.
    /// See [`normalize::arrange_around`].
    #[must_use]
    pub fn arrange_around(
        &self,
        items: &[Item],
        active: &Item,
        bp: BreakpointKey,
    ) -> LayoutOutcome {
        let _span = tracing::debug_span!(
            "layout.arrange_around",
            item = active.id.get(),
            breakpoint = bp.get(),
        )
        .entered();
        normalize::arrange_around(items, active, bp)
    }

    /// Fill in geometry at column breakpoint `bp` for items that lack it.
    #[must_use]
    pub fn specify_undefined_columns(
        &self,
        items: &[Item],
        bp: BreakpointKey,
        breakpoints: &Breakpoints,
    ) -> LayoutOutcome {
        let _span = tracing::debug_span!(
            "layout.specify_undefined",
            breakpoint = bp.get(),
            axis = "columns",
        )
        .entered();
        normalize::specify_undefined(items, bp, breakpoints, GridAxis::Columns)
    }

    /// Fill in geometry at row breakpoint `bp` for items that lack it.
    #[must_use]
    pub fn specify_undefined_rows(
        &self,
        items: &[Item],
        bp: BreakpointKey,
        breakpoints: &Breakpoints,
    ) -> LayoutOutcome {
        let _span = tracing::debug_span!(
            "layout.specify_undefined",
            breakpoint = bp.get(),
            axis = "rows",
        )
        .entered();
        normalize::specify_undefined(items, bp, breakpoints, GridAxis::Rows)
    }
}
