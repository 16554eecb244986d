//! Text measurement for Horizon Lite.
//!
//! Glyph metrics come from a [`FontMetricsProvider`] injected by the
//! application. Two providers ship with the crate:
//!
//! - [`BitmapFontProvider`]: fixed-size faces described by advance tables.
//! - [`VectorFontProvider`]: TrueType/OpenType data read with `ttf-parser`.
//!
//! [`TextMeasurer`] lays text out against a content rectangle under a
//! [`LineBreakMode`], honoring size spans, letter and line spacing, and
//! per-glyph font substitution.
//!
//! # Measuring with spans
//!
//! ```
//! use std::sync::Arc;
//! use horizon_lite_render::Size;
//! use horizon_lite_render::text::{
//!     BitmapFace, BitmapFontProvider, Font, LineBreakMode, MeasureRequest, SpanKind, SpanList,
//!     TextMeasurer,
//! };
//!
//! let provider = BitmapFontProvider::new()
//!     .with_face(BitmapFace::uniform("ui", 16, 8, 20))
//!     .with_face(BitmapFace::uniform("ui", 32, 16, 40));
//! let measurer = TextMeasurer::new(Arc::new(provider));
//!
//! let font = Font::new("ui", 16);
//! let mut spans = SpanList::new();
//! spans.add(0, 1, SpanKind::RelativeSize(2.0)).unwrap();
//!
//! let request = MeasureRequest::new("Big", &font)
//!     .spans(spans.as_slice())
//!     .mode(LineBreakMode::Adapt);
//! let result = measurer.measure(&request);
//! assert_eq!(result.text_size, Size::new(32, 40));
//! ```

mod bidi;
mod bitmap;
mod font;
mod measure;
mod provider;
mod span;
mod vector;

pub use bidi::{TextDirection, contains_rtl, detect_base_direction, is_rtl_char};
pub use bitmap::{BitmapFace, BitmapFontProvider};
pub use font::{DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, Font};
pub use measure::{
    LineBreakMode, LineInfo, MeasureRequest, MeasureResult, MeasurerConfig, TextMeasurer,
    TextSpacing,
};
pub use provider::{DEFAULT_SHAPING_ID, FontId, FontMetricsProvider, can_render, glyph_font};
pub use span::{SpanKind, SpanList, StyledRun, TextSpan, font_sizes};
pub use vector::{VectorFontProvider, VectorMetrics};

static_assertions::assert_impl_all!(BitmapFontProvider: Send, Sync);
static_assertions::assert_impl_all!(VectorFontProvider: Send, Sync);
static_assertions::assert_impl_all!(TextMeasurer: Send, Sync);
