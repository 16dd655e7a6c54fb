//! Nominal flow layout
//!
//! Rest positions of a single column of equally sized items, before any
//! spring displacement.

use springflow_core::{LayoutAttributes, Point, Rect, Size};

/// Single-column vertical flow of uniform items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    item_size: Size,
    spacing: f32,
    item_count: usize,
}

impl FlowLayout {
    pub fn new(item_size: Size, spacing: f32, item_count: usize) -> Self {
        Self {
            item_size,
            spacing,
            item_count,
        }
    }

    /// Distance between the tops of consecutive items
    fn stride(&self) -> f32 {
        self.item_size.height + self.spacing
    }

    /// Total extent of the content
    pub fn content_size(&self) -> Size {
        if self.item_count == 0 {
            return Size::new(self.item_size.width, 0.0);
        }
        let n = self.item_count as f32;
        Size::new(
            self.item_size.width,
            n * self.item_size.height + (n - 1.0) * self.spacing,
        )
    }

    /// Rest center of the item at `index`
    pub fn center_of(&self, index: usize) -> Option<Point> {
        if index >= self.item_count {
            return None;
        }
        Some(Point::new(
            self.item_size.width / 2.0,
            self.item_size.height / 2.0 + index as f32 * self.stride(),
        ))
    }

    pub fn attributes_for_item(&self, index: usize) -> Option<LayoutAttributes> {
        self.center_of(index)
            .map(|center| LayoutAttributes::new(index, center, self.item_size))
    }

    /// Rest attributes of every item whose frame intersects `rect`, in
    /// index order
    pub fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let stride = self.stride();
        if self.item_count == 0 || rect.is_empty() || stride <= 0.0 {
            return Vec::new();
        }

        let last_index = self.item_count - 1;
        let first = (rect.y().max(0.0) / stride).floor() as usize;
        let last = ((rect.max_y().max(0.0) / stride).floor() as usize).min(last_index);
        if first > last_index {
            return Vec::new();
        }

        (first..=last)
            .filter_map(|index| self.attributes_for_item(index))
            .filter(|attrs| attrs.frame().intersects(&rect))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(count: usize) -> FlowLayout {
        FlowLayout::new(Size::new(320.0, 44.0), 10.0, count)
    }

    #[test]
    fn test_centers() {
        let flow = flow(30);
        assert_eq!(flow.center_of(0), Some(Point::new(160.0, 22.0)));
        assert_eq!(flow.center_of(2), Some(Point::new(160.0, 130.0)));
        assert_eq!(flow.center_of(30), None);
    }

    #[test]
    fn test_content_size() {
        assert_eq!(flow(30).content_size(), Size::new(320.0, 30.0 * 44.0 + 29.0 * 10.0));
        assert_eq!(flow(0).content_size().height, 0.0);
        assert_eq!(flow(1).content_size().height, 44.0);
    }

    #[test]
    fn test_attributes_in_rect() {
        let flow = flow(30);

        // 0..=100 covers items 0 (0..44) and 1 (54..98)
        let indices: Vec<usize> = flow
            .attributes_in_rect(Rect::new(0.0, 0.0, 320.0, 100.0))
            .iter()
            .map(|a| a.index)
            .collect();
        assert_eq!(indices, vec![0, 1]);

        // A rect inside the gap between items 0 and 1 hits nothing
        assert!(flow
            .attributes_in_rect(Rect::new(0.0, 45.0, 320.0, 8.0))
            .is_empty());
    }

    #[test]
    fn test_attributes_in_rect_is_clamped() {
        let flow = flow(3);

        let indices: Vec<usize> = flow
            .attributes_in_rect(Rect::new(0.0, -100.0, 320.0, 10_000.0))
            .iter()
            .map(|a| a.index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);

        assert!(flow
            .attributes_in_rect(Rect::new(0.0, 5_000.0, 320.0, 100.0))
            .is_empty());
        assert!(FlowLayout::new(Size::new(320.0, 44.0), 0.0, 0)
            .attributes_in_rect(Rect::new(0.0, 0.0, 320.0, 100.0))
            .is_empty());
    }
}
