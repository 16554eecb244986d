//! Horizon Lite: text labels for small-footprint UIs.
//!
//! Horizon Lite lays out single-font labels on whole-pixel, 16-bit geometry.
//! A [`Label`](widget::Label) measures its text through a
//! [`FontMetricsProvider`](render::text::FontMetricsProvider), resizes itself
//! according to its line-break mode, and scrolls over-wide text as a marquee
//! driven by a [`SharedAnimatorScheduler`].
//!
//! # Crate layout
//!
//! - Core pieces (errors, logging, animator scheduling) are re-exported at the
//!   crate root from `horizon-lite-core`
//! - [`render`] re-exports `horizon-lite-render`: geometry, fonts and the
//!   text measurer
//! - [`widget`] holds the view base, the scroll animator and the label
//!
//! # Driving a marquee
//!
//! ```
//! use std::sync::Arc;
//! use horizon_lite::SharedAnimatorScheduler;
//! use horizon_lite::render::Rect;
//! use horizon_lite::render::text::{BitmapFace, BitmapFontProvider, LineBreakMode};
//! use horizon_lite::widget::Label;
//! use horizon_lite::widget::animation::ScrollAnimatorConfig;
//!
//! let provider = Arc::new(BitmapFontProvider::new().with_face(BitmapFace::uniform("ui", 10, 6, 12)));
//! let scheduler = SharedAnimatorScheduler::with_frame_interval(16);
//!
//! let mut label = Label::new(provider, scheduler.clone())
//!     .with_font("ui", 10)
//!     .with_rect(Rect::new(0, 0, 60, 12))
//!     .with_scroll_config(ScrollAnimatorConfig::new().wait_ticks(0))
//!     .with_text("a headline far too long for its label")
//!     .with_line_break_mode(LineBreakMode::Marquee);
//! assert!(label.is_scrolling());
//!
//! let mut now = 0;
//! for _ in 0..10 {
//!     now += 16;
//!     let due = scheduler.frame(now);
//!     label.handle_frame(&due, now);
//! }
//! assert_ne!(label.scroll_offset(), 0);
//! ```

pub use horizon_lite_core::*;

/// Geometry, fonts and text measurement.
pub mod render {
    pub use horizon_lite_render::*;
}

pub mod widget;
