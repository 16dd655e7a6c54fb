//! Springflow Core
//!
//! Shared primitives for the springflow list layout:
//!
//! - **Geometry**: `Point`, `Size` and `Rect` in layout units
//! - **Layout attributes**: the per-item record a host renders from

pub mod attributes;
pub mod geometry;

pub use attributes::LayoutAttributes;
pub use geometry::{Point, Rect, Size};
