//! Text measurement and font metrics for Horizon Lite.
//!
//! This crate holds the integer geometry types shared by lite widgets and the
//! [`text`] module: the font metrics contract, bitmap and vector providers,
//! style spans, and the line-breaking [`TextMeasurer`](text::TextMeasurer).
//!
//! Lite layouts are whole-pixel and 16-bit, so sizes are [`i16`] and
//! intermediate sums saturate instead of wrapping.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_lite_render::{Size, TextResult};
//! use horizon_lite_render::text::{BitmapFace, BitmapFontProvider, Font, TextMeasurer};
//!
//! # fn main() -> TextResult<()> {
//! let provider = Arc::new(BitmapFontProvider::new().with_face(BitmapFace::uniform("ui", 14, 7, 18)));
//! let measurer = TextMeasurer::new(provider);
//!
//! let width = measurer.text_width("Hello", &Font::new("ui", 14))?;
//! assert_eq!(width, 35);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod text;
mod types;

pub use error::{TextError, TextResult};
pub use types::{Color, Point, Rect, Size, saturate_i16};
