//! Spring flow layout
//!
//! Items are laid out by a nominal [`FlowLayout`], then each item near the
//! viewport is attached to its rest position by a spring. Layout queries
//! answer from the spring simulation, not from the flow.
//!
//! Two handlers displace attached items:
//!
//! - **Boundary overscroll**: while the viewport is pulled past the top or
//!   bottom edge, every attached item is placed analytically so the gaps
//!   near the pulled edge stretch with the overscroll distance.
//! - **Drag follow**: while scrolling inside the content with a finger down,
//!   each item moves by a share of the scroll delta proportional to its
//!   distance from the finger, so far items trail behind.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use springflow_animation::{AttachmentId, AttachmentSolver, SpringSolver};
use springflow_core::{LayoutAttributes, Point, Rect, Size};

use crate::config::SpringFlowConfig;
use crate::context::{LayoutContext, Overscroll};
use crate::error::Result;
use crate::flow::FlowLayout;

/// Vertical list layout with spring-attached items
pub struct SpringFlowLayout<S: AttachmentSolver = SpringSolver> {
    config: SpringFlowConfig,
    solver: S,
    /// Items inside the expanded viewport on the last visibility pass
    visible: FxHashSet<usize>,
    /// Exactly one attachment per attached item
    attachments: FxHashMap<usize, AttachmentId>,
}

impl SpringFlowLayout<SpringSolver> {
    /// Layout with default configuration
    pub fn new() -> Self {
        Self::with_solver(SpringFlowConfig::default(), SpringSolver::new())
    }

    /// Layout with a validated configuration
    pub fn with_config(config: SpringFlowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_solver(config, SpringSolver::new()))
    }
}

impl Default for SpringFlowLayout<SpringSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AttachmentSolver> SpringFlowLayout<S> {
    /// Layout driving a custom solver.
    ///
    /// The configuration is used as given; call
    /// [`SpringFlowConfig::validate`] first if it comes from outside.
    pub fn with_solver(config: SpringFlowConfig, solver: S) -> Self {
        Self {
            config,
            solver,
            visible: FxHashSet::default(),
            attachments: FxHashMap::default(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &SpringFlowConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Spring parameters apply to attachments created afterwards.
    pub fn set_config(&mut self, config: SpringFlowConfig) -> Result<()> {
        config.validate()?;
        tracing::debug!(?config, "spring flow config updated");
        self.config = config;
        Ok(())
    }

    /// Set the item height, typically once the container width is known.
    ///
    /// Non-positive or non-finite heights are ignored.
    pub fn set_item_height(&mut self, height: f32) {
        if height.is_finite() && height > 0.0 {
            self.config.item_height = height;
        } else {
            tracing::debug!(height, "ignoring invalid item height");
        }
    }

    /// Solver holding the attachments
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Number of attached items
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Indices seen by the last visibility pass, sorted
    pub fn visible_items(&self) -> Vec<usize> {
        let mut items: Vec<usize> = self.visible.iter().copied().collect();
        items.sort_unstable();
        items
    }

    /// Nominal content size of `item_count` items in a container of `width`
    pub fn flow_content_size(&self, width: f32, item_count: usize) -> Size {
        self.flow(width, item_count).content_size()
    }

    fn flow(&self, width: f32, item_count: usize) -> FlowLayout {
        FlowLayout::new(
            Size::new(width, self.config.item_height),
            self.config.item_spacing,
            item_count,
        )
    }

    /// Prepare attachments for a layout pass.
    ///
    /// While overscrolled, attached items are placed by the boundary
    /// handler and visibility is left untouched. Otherwise attachments are
    /// synced with the items near the viewport.
    pub fn prepare_layout(&mut self, ctx: &LayoutContext) {
        if !ctx.is_valid() {
            tracing::trace!(?ctx, "skipping layout pass with unusable context");
            return;
        }

        // The first pass only attaches, so the initial layout is not animated
        if self.solver.attachment_count() != 0 {
            match ctx.overscroll() {
                Overscroll::Top { distance } => {
                    self.stretch_from_top(distance);
                    return;
                }
                Overscroll::Bottom { distance } => {
                    self.stretch_from_bottom(distance, ctx);
                    return;
                }
                Overscroll::None => {}
            }
        }

        self.update_visible_items(ctx);
    }

    /// Sync attachments with the items inside the expanded viewport
    fn update_visible_items(&mut self, ctx: &LayoutContext) {
        let flow = self.flow(ctx.viewport_size.width, ctx.item_count);
        let visible_rect = ctx.bounds().inset(0.0, -self.config.visible_margin);
        let visible_items = flow.attributes_in_rect(visible_rect);

        let now_visible: FxHashSet<usize> = visible_items.iter().map(|a| a.index).collect();
        let dropped: SmallVec<[usize; 16]> =
            self.visible.difference(&now_visible).copied().collect();
        self.visible = now_visible;

        for index in dropped {
            if let Some(id) = self.attachments.remove(&index) {
                self.solver.destroy_attachment(id);
                tracing::trace!(index, "detached item");
            }
        }

        let spring = self.config.spring();
        for item in visible_items {
            if self.attachments.contains_key(&item.index) {
                continue;
            }
            let id = self.solver.create_attachment(item, item.center, spring);
            self.attachments.insert(item.index, id);
            tracing::trace!(index = item.index, y = item.center.y, "attached item");
        }
    }

    /// Spread attached items away from the top edge
    fn stretch_from_top(&mut self, distance: f32) {
        let offset = distance / self.config.boundary_scroll_resistance_factor;
        let height = self.config.item_height;
        let stride = self.config.item_spacing + height + offset;
        tracing::debug!(distance, offset, "overscroll past top edge");

        for (&index, &id) in &self.attachments {
            let Some(item) = self.solver.item(id) else {
                tracing::trace!(index, "attachment missing from solver");
                continue;
            };
            let y = height / 2.0 + offset + stride * index as f32 - distance;
            self.solver.set_item_center(id, Point::new(item.center.x, y));
        }
    }

    /// Spread attached items away from the bottom edge, mirroring
    /// [`Self::stretch_from_top`] around the content height
    fn stretch_from_bottom(&mut self, distance: f32, ctx: &LayoutContext) {
        let offset = distance / self.config.boundary_scroll_resistance_factor;
        let height = self.config.item_height;
        let stride = self.config.item_spacing + height + offset;
        let content_height = ctx.content_size.height;
        let item_count = ctx.item_count as f32;
        tracing::debug!(distance, offset, "overscroll past bottom edge");

        for (&index, &id) in &self.attachments {
            let Some(item) = self.solver.item(id) else {
                tracing::trace!(index, "attachment missing from solver");
                continue;
            };
            let from_end = item_count - index as f32 - 1.0;
            let y = content_height - (height / 2.0 + offset + stride * from_end - distance);
            self.solver.set_item_center(id, Point::new(item.center.x, y));
        }
    }

    /// Answer whether a bounds change needs a full relayout.
    ///
    /// It never does: inside the scroll range the attached items are nudged
    /// towards the new bounds instead, scaled by their distance from the
    /// touch point.
    pub fn should_invalidate_layout_for_bounds_change(
        &mut self,
        ctx: &LayoutContext,
        new_bounds: Rect,
    ) -> bool {
        if !ctx.is_valid() || !new_bounds.origin.is_finite() {
            return false;
        }

        if ctx.is_within_scroll_range() {
            self.follow_touch(ctx, new_bounds);
        }

        false
    }

    fn follow_touch(&mut self, ctx: &LayoutContext, new_bounds: Rect) {
        let Some(touch) = ctx.touch_location else {
            return;
        };
        let scroll_distance = new_bounds.y() - ctx.content_offset.y;
        if scroll_distance == 0.0 {
            return;
        }

        for &id in self.attachments.values() {
            let Some(item) = self.solver.item(id) else {
                continue;
            };
            let distance_from_touch = (touch.y - item.center.y).abs();
            let resistance = distance_from_touch / self.config.scroll_resistance_factor;
            let offset = scroll_distance * resistance;

            self.solver
                .set_item_center(id, Point::new(item.center.x, item.center.y + offset));
        }
    }

    /// Simulated attributes of every item intersecting `rect`
    pub fn layout_attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        self.solver.items_in_rect(rect)
    }

    /// Simulated attributes of one item, if it is attached
    pub fn layout_attributes_for_item(&self, index: usize) -> Option<LayoutAttributes> {
        let id = self.attachments.get(&index)?;
        self.solver.item(*id)
    }

    /// Advance the spring simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.solver.step(dt);
    }

    /// Whether every attached item rests on its anchor
    pub fn is_settled(&self) -> bool {
        self.solver.is_settled()
    }

    /// Drop every attachment and forget visibility.
    ///
    /// The next pass behaves like the first one, e.g. after the data
    /// source reloads.
    pub fn reset(&mut self) {
        for (_, id) in self.attachments.drain() {
            self.solver.destroy_attachment(id);
        }
        self.visible.clear();
        tracing::debug!("spring flow layout reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(320.0, 480.0);

    fn ctx(layout: &SpringFlowLayout, offset_y: f32, count: usize) -> LayoutContext {
        LayoutContext::new(
            Point::new(0.0, offset_y),
            VIEWPORT,
            layout.flow_content_size(VIEWPORT.width, count),
            count,
        )
    }

    #[test]
    fn test_first_pass_attaches_expanded_viewport() {
        let mut layout = SpringFlowLayout::new();
        let ctx = ctx(&layout, 0.0, 30);
        layout.prepare_layout(&ctx);

        // Viewport plus margin covers -100..580; stride 54 reaches item 10
        assert_eq!(layout.visible_items(), (0..=10).collect::<Vec<_>>());
        assert_eq!(layout.attachment_count(), 11);
        assert_eq!(layout.solver().attachment_count(), 11);
    }

    #[test]
    fn test_attached_item_reports_rest_position() {
        let mut layout = SpringFlowLayout::new();
        let ctx = ctx(&layout, 0.0, 30);
        layout.prepare_layout(&ctx);

        let attrs = layout.layout_attributes_for_item(2).unwrap();
        assert_eq!(attrs.center, Point::new(160.0, 22.0 + 2.0 * 54.0));
        assert_eq!(attrs.size, Size::new(320.0, 44.0));
        assert!(layout.layout_attributes_for_item(25).is_none());
    }

    #[test]
    fn test_invalid_context_is_skipped() {
        let mut layout = SpringFlowLayout::new();
        let mut ctx = ctx(&layout, 0.0, 30);
        ctx.viewport_size = Size::ZERO;

        layout.prepare_layout(&ctx);
        assert_eq!(layout.attachment_count(), 0);
        assert!(!layout.should_invalidate_layout_for_bounds_change(&ctx, Rect::ZERO));
    }

    #[test]
    fn test_empty_list_never_attaches() {
        let mut layout = SpringFlowLayout::new();
        let ctx = ctx(&layout, -30.0, 0);

        layout.prepare_layout(&ctx);
        layout.prepare_layout(&ctx);
        assert_eq!(layout.attachment_count(), 0);
        assert!(layout.layout_attributes_in_rect(ctx.bounds()).is_empty());
    }

    #[test]
    fn test_reset_forgets_attachments() {
        let mut layout = SpringFlowLayout::new();
        let ctx = ctx(&layout, 0.0, 30);
        layout.prepare_layout(&ctx);

        layout.reset();
        assert_eq!(layout.attachment_count(), 0);
        assert_eq!(layout.solver().attachment_count(), 0);
        assert!(layout.visible_items().is_empty());

        layout.prepare_layout(&ctx);
        assert_eq!(layout.attachment_count(), 11);
    }

    #[test]
    fn test_set_item_height_ignores_invalid_values() {
        let mut layout = SpringFlowLayout::new();
        layout.set_item_height(60.0);
        assert_eq!(layout.config().item_height, 60.0);

        layout.set_item_height(0.0);
        layout.set_item_height(f32::NAN);
        assert_eq!(layout.config().item_height, 60.0);
    }

    #[test]
    fn test_set_config_validates() {
        let mut layout = SpringFlowLayout::new();
        let bad = SpringFlowConfig {
            boundary_scroll_resistance_factor: 0.0,
            ..Default::default()
        };

        assert!(layout.set_config(bad).is_err());
        assert_eq!(layout.config(), &SpringFlowConfig::default());
        assert!(SpringFlowLayout::with_config(bad).is_err());
    }
}
