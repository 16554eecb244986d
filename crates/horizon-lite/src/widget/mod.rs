//! Widget system for Horizon Lite.
//!
//! - [`ViewBase`]: rectangle, padding, visibility and repaint state shared by
//!   every view
//! - [`animation`]: animators advanced by their owning widget
//! - [`widgets`]: concrete widgets, currently [`Label`]

pub mod animation;
mod base;
pub mod widgets;

pub use base::{Padding, ViewBase};
pub use widgets::Label;
