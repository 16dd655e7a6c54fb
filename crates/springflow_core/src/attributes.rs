//! Per-item layout attributes

use crate::geometry::{Point, Rect, Size};

/// Position and size of a single list item.
///
/// Produced both by the nominal flow layout and by the spring simulation;
/// only `center` differs between the two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutAttributes {
    /// Index of the item in its (single) sequence
    pub index: usize,
    /// Center of the item in content coordinates
    pub center: Point,
    /// Size of the item
    pub size: Size,
}

impl LayoutAttributes {
    pub fn new(index: usize, center: Point, size: Size) -> Self {
        Self {
            index,
            center,
            size,
        }
    }

    /// Frame derived from center and size
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Copy of these attributes moved to `center`
    pub fn with_center(self, center: Point) -> Self {
        Self { center, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_follows_center() {
        let attrs = LayoutAttributes::new(3, Point::new(160.0, 22.0), Size::new(320.0, 44.0));
        assert_eq!(attrs.frame(), Rect::new(0.0, 0.0, 320.0, 44.0));

        let moved = attrs.with_center(Point::new(160.0, 122.0));
        assert_eq!(moved.index, 3);
        assert_eq!(moved.frame().y(), 100.0);
    }
}
