//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while measuring text or managing fonts.
///
/// None of these cross a widget boundary as a failure: widgets log them and
/// fall back to a safe default (blank text, unchanged state).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The requested font family and size are not available.
    #[error("font '{name}' at size {size} could not be resolved")]
    FontResolution { name: String, size: u8 },

    /// A span range is inverted.
    #[error("span range {start}..{end} is invalid")]
    InvalidSpanRange { start: usize, end: usize },

    /// A numeric line break mode is outside the known range.
    #[error("invalid line break mode value {0}")]
    InvalidMode(u8),

    /// Font data could not be parsed.
    #[error("invalid font data: {0}")]
    FontData(String),
}

impl From<ttf_parser::FaceParsingError> for TextError {
    fn from(err: ttf_parser::FaceParsingError) -> Self {
        Self::FontData(err.to_string())
    }
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
