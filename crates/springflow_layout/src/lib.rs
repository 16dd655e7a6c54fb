//! Springflow Layout
//!
//! A vertical list layout whose items hang off their rest positions on
//! springs. Scrolling past either edge stretches the gaps between items,
//! and dragging makes items far from the finger lag behind the ones under
//! it, giving the whole list a jello-like feel.
//!
//! The layout is host-agnostic: every pass receives a [`LayoutContext`]
//! describing the viewport instead of reading a live view.
//!
//! # Example
//!
//! ```rust
//! use springflow_core::{Point, Size};
//! use springflow_layout::{LayoutContext, SpringFlowLayout};
//!
//! let mut layout = SpringFlowLayout::new();
//! let viewport = Size::new(320.0, 480.0);
//! let content = layout.flow_content_size(viewport.width, 30);
//!
//! // First pass attaches everything near the viewport
//! let ctx = LayoutContext::new(Point::ZERO, viewport, content, 30);
//! layout.prepare_layout(&ctx);
//! assert!(layout.attachment_count() > 0);
//!
//! // Query simulated positions for rendering
//! let first = layout.layout_attributes_for_item(0);
//! assert!(first.is_some());
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod flow;
pub mod layout;

pub use config::SpringFlowConfig;
pub use context::{LayoutContext, Overscroll};
pub use error::{LayoutError, Result};
pub use flow::FlowLayout;
pub use layout::SpringFlowLayout;
