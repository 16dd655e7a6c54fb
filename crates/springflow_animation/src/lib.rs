//! Springflow Animation System
//!
//! Spring physics and the attachment solver that drives the list layout.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Attachments**: zero-length springs binding a layout item to an anchor
//! - **Abrupt repositioning**: items can be snapped anywhere and re-settle
//!   from there without the simulation diverging

pub mod solver;
pub mod spring;

pub use solver::{AttachmentId, AttachmentSolver, SpringSolver};
pub use spring::{Spring, SpringConfig};
