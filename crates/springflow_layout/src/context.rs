//! Per-pass layout context
//!
//! Everything the layout needs to know about its host for one pass.

use springflow_core::{Point, Rect, Size};

/// Where the viewport sits relative to the content edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overscroll {
    /// Viewport is within the content
    None,
    /// Pulled past the top edge by `distance`
    Top { distance: f32 },
    /// Pulled past the bottom edge by `distance`
    Bottom { distance: f32 },
}

/// Snapshot of the host's scroll state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutContext {
    /// Scroll position (only `y` is used)
    pub content_offset: Point,
    /// Size of the visible viewport
    pub viewport_size: Size,
    /// Total scrollable extent
    pub content_size: Size,
    /// Number of items in the list
    pub item_count: usize,
    /// Pointer location in content coordinates while a drag is active
    pub touch_location: Option<Point>,
}

impl LayoutContext {
    pub fn new(
        content_offset: Point,
        viewport_size: Size,
        content_size: Size,
        item_count: usize,
    ) -> Self {
        Self {
            content_offset,
            viewport_size,
            content_size,
            item_count,
            touch_location: None,
        }
    }

    /// Same context with an active drag at `location`
    pub fn with_touch(mut self, location: Point) -> Self {
        self.touch_location = Some(location);
        self
    }

    /// Same context scrolled to `offset_y`
    pub fn with_offset_y(mut self, offset_y: f32) -> Self {
        self.content_offset.y = offset_y;
        self
    }

    /// Viewport rectangle in content coordinates
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.content_offset, self.viewport_size)
    }

    /// Whether the snapshot describes a usable viewport
    pub fn is_valid(&self) -> bool {
        self.content_offset.is_finite()
            && self.viewport_size.is_finite()
            && self.content_size.is_finite()
            && self.viewport_size.width > 0.0
            && self.viewport_size.height > 0.0
            && self.touch_location.map_or(true, |p| p.is_finite())
    }

    pub fn overscroll(&self) -> Overscroll {
        let offset = self.content_offset.y;
        let trailing = offset + self.viewport_size.height;

        if offset < 0.0 {
            Overscroll::Top {
                distance: offset.abs(),
            }
        } else if trailing > self.content_size.height {
            Overscroll::Bottom {
                distance: (trailing - self.content_size.height).abs(),
            }
        } else {
            Overscroll::None
        }
    }

    /// Whether the viewport is inside the content (edges inclusive)
    pub fn is_within_scroll_range(&self) -> bool {
        self.overscroll() == Overscroll::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(offset_y: f32) -> LayoutContext {
        LayoutContext::new(
            Point::new(0.0, offset_y),
            Size::new(320.0, 400.0),
            Size::new(320.0, 1000.0),
            20,
        )
    }

    #[test]
    fn test_overscroll_classification() {
        assert_eq!(ctx(-20.0).overscroll(), Overscroll::Top { distance: 20.0 });
        assert_eq!(ctx(0.0).overscroll(), Overscroll::None);
        assert_eq!(ctx(600.0).overscroll(), Overscroll::None);
        assert_eq!(
            ctx(650.0).overscroll(),
            Overscroll::Bottom { distance: 50.0 }
        );
    }

    #[test]
    fn test_short_content_at_rest_counts_as_bottom_overscroll() {
        // Content shorter than the viewport is past the trailing edge
        let short = LayoutContext::new(
            Point::ZERO,
            Size::new(320.0, 400.0),
            Size::new(320.0, 100.0),
            2,
        );
        assert_eq!(short.overscroll(), Overscroll::Bottom { distance: 300.0 });
    }

    #[test]
    fn test_validity() {
        assert!(ctx(0.0).is_valid());
        assert!(!ctx(f32::NAN).is_valid());

        let mut zero = ctx(0.0);
        zero.viewport_size = Size::ZERO;
        assert!(!zero.is_valid());

        let bad_touch = ctx(0.0).with_touch(Point::new(0.0, f32::INFINITY));
        assert!(!bad_touch.is_valid());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(ctx(120.0).bounds(), Rect::new(0.0, 120.0, 320.0, 400.0));
    }
}
