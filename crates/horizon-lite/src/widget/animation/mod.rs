//! Animation support for lite widgets.
//!
//! Animators here are plain state machines advanced by the owning widget.
//! Scheduling (which animators receive a frame and when) lives in
//! [`horizon_lite_core::animator`].

mod scroll;

pub use scroll::{
    DEFAULT_SCROLL_SPEED, DEFAULT_WAIT_TICKS, ScrollAnimator, ScrollAnimatorConfig, ScrollState,
};
