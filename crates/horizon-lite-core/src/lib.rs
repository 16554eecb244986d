//! Core systems for Horizon Lite.
//!
//! This crate provides the foundational pieces shared by the rest of the
//! workspace:
//!
//! - **Errors**: the core error type and result alias
//! - **Logging**: tracing targets, span names and helper macros
//! - **Animator scheduling**: registration of per-widget animators driven by a
//!   wrap-around millisecond clock
//!
//! # Animator Example
//!
//! ```
//! use horizon_lite_core::SharedAnimatorScheduler;
//!
//! let scheduler = SharedAnimatorScheduler::with_frame_interval(16);
//! let id = scheduler.register();
//! scheduler.start(id, 0).unwrap();
//!
//! // The host loop hands out frames; each id is routed to its owning widget.
//! for due in scheduler.frame(16) {
//!     assert_eq!(due, id);
//! }
//!
//! scheduler.unregister(id).unwrap();
//! ```

pub mod animator;
mod error;
pub mod logging;

pub use animator::{
    AnimatorId, AnimatorScheduler, AnimatorState, DEFAULT_FRAME_INTERVAL_MS,
    SharedAnimatorScheduler,
};
pub use error::{AnimatorError, LiteError, Result};
pub use logging::PerfSpan;
