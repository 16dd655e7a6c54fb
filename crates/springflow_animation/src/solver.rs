//! Attachment solver
//!
//! Owns every live attachment and advances them each frame. An attachment
//! binds one layout item to an anchor point through a zero-length spring on
//! each axis, so the item is always pulled back towards its anchor.

use slotmap::{new_key_type, SlotMap};
use springflow_core::{LayoutAttributes, Point, Rect};

use crate::spring::{Spring, SpringConfig};

new_key_type! {
    pub struct AttachmentId;
}

/// Capability interface of a spring simulation that hosts attachments.
///
/// Implementations must tolerate stale ids: operations on an attachment
/// that was already destroyed report absence instead of panicking.
pub trait AttachmentSolver {
    /// Attach `item` to `anchor`. The item starts at its own center.
    fn create_attachment(
        &mut self,
        item: LayoutAttributes,
        anchor: Point,
        config: SpringConfig,
    ) -> AttachmentId;

    /// Remove an attachment, returning the item's last simulated attributes
    fn destroy_attachment(&mut self, id: AttachmentId) -> Option<LayoutAttributes>;

    /// Move the attached item to `center` and re-settle from there.
    ///
    /// Returns `false` if the attachment does not exist.
    fn set_item_center(&mut self, id: AttachmentId, center: Point) -> bool;

    /// Current simulated attributes of the attached item
    fn item(&self, id: AttachmentId) -> Option<LayoutAttributes>;

    /// Simulated attributes of every item whose frame intersects `rect`,
    /// ordered by item index
    fn items_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes>;

    fn attachment_count(&self) -> usize;

    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);

    /// Whether every attachment is at rest on its anchor
    fn is_settled(&self) -> bool;
}

/// A single attached item
#[derive(Clone, Copy, Debug)]
struct Attachment {
    item: LayoutAttributes,
    anchor: Point,
    x: Spring,
    y: Spring,
}

impl Attachment {
    fn new(item: LayoutAttributes, anchor: Point, config: SpringConfig) -> Self {
        let mut x = Spring::new(config, item.center.x);
        let mut y = Spring::new(config, item.center.y);
        x.set_target(anchor.x);
        y.set_target(anchor.y);
        Self { item, anchor, x, y }
    }

    fn attributes(&self) -> LayoutAttributes {
        self.item.with_center(Point::new(self.x.value(), self.y.value()))
    }
}

/// Default solver: independent RK4 springs per attachment
pub struct SpringSolver {
    attachments: SlotMap<AttachmentId, Attachment>,
}

impl SpringSolver {
    pub fn new() -> Self {
        Self {
            attachments: SlotMap::with_key(),
        }
    }

    /// Anchor point of an attachment
    pub fn anchor(&self, id: AttachmentId) -> Option<Point> {
        self.attachments.get(id).map(|a| a.anchor)
    }
}

impl Default for SpringSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentSolver for SpringSolver {
    fn create_attachment(
        &mut self,
        item: LayoutAttributes,
        anchor: Point,
        config: SpringConfig,
    ) -> AttachmentId {
        self.attachments.insert(Attachment::new(item, anchor, config))
    }

    fn destroy_attachment(&mut self, id: AttachmentId) -> Option<LayoutAttributes> {
        self.attachments.remove(id).map(|a| a.attributes())
    }

    fn set_item_center(&mut self, id: AttachmentId, center: Point) -> bool {
        let Some(attachment) = self.attachments.get_mut(id) else {
            tracing::trace!(?id, "set_item_center on missing attachment");
            return false;
        };
        attachment.x.snap_to(center.x);
        attachment.y.snap_to(center.y);
        true
    }

    fn item(&self, id: AttachmentId) -> Option<LayoutAttributes> {
        self.attachments.get(id).map(Attachment::attributes)
    }

    fn items_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let mut items: Vec<LayoutAttributes> = self
            .attachments
            .values()
            .map(Attachment::attributes)
            .filter(|attrs| attrs.frame().intersects(&rect))
            .collect();
        items.sort_by_key(|attrs| attrs.index);
        items
    }

    fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    fn step(&mut self, dt: f32) {
        for attachment in self.attachments.values_mut() {
            attachment.x.step(dt);
            attachment.y.step(dt);
        }
    }

    fn is_settled(&self) -> bool {
        self.attachments
            .values()
            .all(|a| a.x.is_settled() && a.y.is_settled())
    }
}
