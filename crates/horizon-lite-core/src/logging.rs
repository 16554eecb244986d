//! Logging and tracing facilities for Horizon Lite.
//!
//! Horizon Lite uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! All crates in the workspace log under the targets listed in [`targets`],
//! so a directive such as `horizon_lite::label=trace` isolates label
//! remeasurement while keeping the rest of the toolkit quiet.

/// Span names used throughout Horizon Lite for tracing.
pub mod span_names {
    /// Frame dispatch to a widget animator.
    pub const ANIMATOR_FRAME: &str = "horizon_lite::animator_frame";
    /// Label remeasure span.
    pub const REMEASURE: &str = "horizon_lite::remeasure";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_lite_core";
    /// Animator scheduler target.
    pub const ANIMATOR: &str = "horizon_lite_core::animator";
    /// Text measurement and font provider target.
    pub const TEXT: &str = "horizon_lite_render::text";
    /// Label widget target.
    pub const LABEL: &str = "horizon_lite::label";
    /// Marquee scroll animation target.
    pub const SCROLL: &str = "horizon_lite::scroll";
    /// Performance spans.
    pub const PERF: &str = "horizon_lite::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to bracket operations whose duration is interesting, such as a
/// label remeasure.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
