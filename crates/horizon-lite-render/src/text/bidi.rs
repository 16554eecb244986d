//! Base direction detection.
//!
//! A label's paragraph direction comes from its first strong character
//! (rules P2/P3 of UAX #9). Marquee scrolling and alignment both key off it.
//!
//! ```
//! use horizon_lite_render::text::{detect_base_direction, TextDirection};
//!
//! assert_eq!(detect_base_direction("Hello"), TextDirection::LeftToRight);
//! assert_eq!(detect_base_direction("שלום"), TextDirection::RightToLeft);
//! assert_eq!(detect_base_direction("123 مرحبا"), TextDirection::RightToLeft);
//! ```

use unicode_bidi::{BidiClass, bidi_class};

/// Paragraph direction of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    pub fn is_ltr(self) -> bool {
        matches!(self, TextDirection::LeftToRight)
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, TextDirection::RightToLeft)
    }
}

/// Direction of the first strong character, left-to-right when there is none.
pub fn detect_base_direction(text: &str) -> TextDirection {
    text.chars()
        .find_map(|c| match bidi_class(c) {
            BidiClass::L => Some(TextDirection::LeftToRight),
            BidiClass::R | BidiClass::AL => Some(TextDirection::RightToLeft),
            _ => None,
        })
        .unwrap_or_default()
}

/// Whether `c` is a strong right-to-left character (classes R and AL).
pub fn is_rtl_char(c: char) -> bool {
    matches!(bidi_class(c), BidiClass::R | BidiClass::AL)
}

/// Whether any character of `text` is strong right-to-left.
pub fn contains_rtl(text: &str) -> bool {
    text.chars().any(is_rtl_char)
}
