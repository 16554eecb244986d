//! Styled character ranges.
//!
//! Spans attach a color or size to a half-open `[start, end)` range of
//! character indices. Ranges are stored as given and clamped to the text
//! length when they are applied, so editing the text never invalidates a
//! span. Where spans of the same kind overlap, the one added later wins.

use std::ops::Range;

use crate::error::{TextError, TextResult};
use crate::types::Color;

/// What a span changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpanKind {
    /// Fill behind the glyphs of the range.
    BackgroundColor(Color),
    /// Glyph color of the range.
    ForegroundColor(Color),
    /// Fill behind every line the range touches, edge to edge.
    LineBackgroundColor(Color),
    /// Font size in pixels.
    AbsoluteSize(u8),
    /// Font size as a multiple of the base size.
    RelativeSize(f32),
}

impl SpanKind {
    /// Whether this span changes glyph metrics.
    pub fn affects_layout(&self) -> bool {
        matches!(self, SpanKind::AbsoluteSize(_) | SpanKind::RelativeSize(_))
    }

    fn font_size(&self, base: u8) -> Option<u8> {
        match *self {
            SpanKind::AbsoluteSize(size) => Some(size),
            SpanKind::RelativeSize(factor) => {
                let scaled = (base as f32 * factor).round();
                Some(if scaled.is_finite() { scaled.clamp(1.0, u8::MAX as f32) as u8 } else { base })
            }
            _ => None,
        }
    }
}

/// A styled character range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSpan {
    start: usize,
    end: usize,
    kind: SpanKind,
}

impl TextSpan {
    /// Create a span over `[start, end)`.
    ///
    /// Fails with [`TextError::InvalidSpanRange`] when `start > end`.
    pub fn new(start: usize, end: usize, kind: SpanKind) -> TextResult<Self> {
        if start > end {
            return Err(TextError::InvalidSpanRange { start, end });
        }
        Ok(Self { start, end, kind })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// The range clamped to a text of `len` characters, or `None` if nothing
    /// of it remains.
    pub fn clamped(&self, len: usize) -> Option<Range<usize>> {
        let start = self.start.min(len);
        let end = self.end.min(len);
        (start < end).then_some(start..end)
    }
}

/// Per-character font sizes for a text of `len` characters.
pub fn font_sizes(spans: &[TextSpan], len: usize, base: u8) -> Vec<u8> {
    let mut sizes = vec![base; len];
    for span in spans {
        let (Some(range), Some(size)) = (span.clamped(len), span.kind.font_size(base)) else {
            continue;
        };
        sizes[range].fill(size);
    }
    sizes
}

/// The glyph color of each character, after foreground spans.
fn foreground_colors(spans: &[TextSpan], len: usize, base: Color) -> Vec<Color> {
    let mut colors = vec![base; len];
    for span in spans {
        if let (SpanKind::ForegroundColor(color), Some(range)) = (span.kind, span.clamped(len)) {
            colors[range].fill(color);
        }
    }
    colors
}

fn background_colors(spans: &[TextSpan], len: usize) -> Vec<Option<Color>> {
    let mut colors = vec![None; len];
    for span in spans {
        if let (SpanKind::BackgroundColor(color), Some(range)) = (span.kind, span.clamped(len)) {
            colors[range].fill(Some(color));
        }
    }
    colors
}

/// A maximal run of characters sharing one style, ready for painting.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    /// Character range of the run.
    pub range: Range<usize>,
    /// Glyph color.
    pub color: Color,
    /// Fill behind the glyphs, if any.
    pub background: Option<Color>,
    /// Font size in pixels.
    pub font_size: u8,
}

/// An ordered collection of spans.
///
/// # Example
///
/// ```
/// use horizon_lite_render::text::{SpanKind, SpanList};
/// use horizon_lite_render::Color;
///
/// let mut spans = SpanList::new();
/// spans.add(0, 5, SpanKind::ForegroundColor(Color::RED)).unwrap();
/// spans.add(2, 4, SpanKind::AbsoluteSize(30)).unwrap();
/// assert!(spans.add(4, 2, SpanKind::AbsoluteSize(30)).is_err());
///
/// let runs = spans.styled_runs(6, Color::BLACK, 18);
/// assert_eq!(runs.len(), 4);
/// assert_eq!(runs[0].range, 0..2);
/// assert_eq!(runs[3].color, Color::BLACK);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanList {
    spans: Vec<TextSpan>,
}

impl SpanList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a span.
    pub fn add(&mut self, start: usize, end: usize, kind: SpanKind) -> TextResult<()> {
        self.spans.push(TextSpan::new(start, end, kind)?);
        Ok(())
    }

    /// Append an already validated span.
    pub fn push(&mut self, span: TextSpan) {
        self.spans.push(span);
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn as_slice(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextSpan> {
        self.spans.iter()
    }

    /// Whether any span changes glyph metrics.
    pub fn affects_layout(&self) -> bool {
        self.spans.iter().any(|span| span.kind.affects_layout())
    }

    /// Per-character font sizes, see [`font_sizes`].
    pub fn font_sizes(&self, len: usize, base: u8) -> Vec<u8> {
        font_sizes(&self.spans, len, base)
    }

    /// The line background that applies to `line`, if any span touches it.
    ///
    /// An empty line is touched by a span that contains its position.
    pub fn line_background(&self, line: Range<usize>, len: usize) -> Option<Color> {
        self.spans.iter().rev().find_map(|span| {
            let SpanKind::LineBackgroundColor(color) = span.kind else {
                return None;
            };
            let range = span.clamped(len)?;
            let touches = if line.is_empty() {
                range.contains(&line.start)
            } else {
                range.start < line.end && line.start < range.end
            };
            touches.then_some(color)
        })
    }

    /// Split `len` characters into maximal runs of identical style.
    pub fn styled_runs(&self, len: usize, base_color: Color, base_size: u8) -> Vec<StyledRun> {
        let colors = foreground_colors(&self.spans, len, base_color);
        let backgrounds = background_colors(&self.spans, len);
        let sizes = self.font_sizes(len, base_size);

        let mut runs: Vec<StyledRun> = Vec::new();
        for index in 0..len {
            let (color, background, font_size) = (colors[index], backgrounds[index], sizes[index]);
            match runs.last_mut() {
                Some(run)
                    if run.color == color
                        && run.background == background
                        && run.font_size == font_size =>
                {
                    run.range.end = index + 1;
                }
                _ => runs.push(StyledRun {
                    range: index..index + 1,
                    color,
                    background,
                    font_size,
                }),
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_rejected() {
        let err = TextSpan::new(5, 2, SpanKind::AbsoluteSize(10)).unwrap_err();
        assert_eq!(err, TextError::InvalidSpanRange { start: 5, end: 2 });

        let mut spans = SpanList::new();
        assert!(spans.add(3, 1, SpanKind::ForegroundColor(Color::RED)).is_err());
        assert!(spans.is_empty());
    }

    #[test]
    fn test_clamping() {
        let span = TextSpan::new(3, 100, SpanKind::AbsoluteSize(10)).unwrap();
        assert_eq!(span.clamped(5), Some(3..5));
        assert_eq!(span.clamped(3), None);
        let empty = TextSpan::new(2, 2, SpanKind::AbsoluteSize(10)).unwrap();
        assert_eq!(empty.clamped(10), None);
    }

    #[test]
    fn test_later_size_span_wins() {
        let mut spans = SpanList::new();
        spans.add(0, 4, SpanKind::AbsoluteSize(20)).unwrap();
        spans.add(2, 6, SpanKind::RelativeSize(2.0)).unwrap();
        assert_eq!(spans.font_sizes(6, 10), vec![20, 20, 20, 20, 20, 20]);

        let mut spans = SpanList::new();
        spans.add(0, 4, SpanKind::AbsoluteSize(12)).unwrap();
        spans.add(2, 6, SpanKind::RelativeSize(1.5)).unwrap();
        assert_eq!(spans.font_sizes(6, 10), vec![12, 12, 15, 15, 15, 15]);
    }

    #[test]
    fn test_relative_size_clamps() {
        let mut spans = SpanList::new();
        spans.add(0, 1, SpanKind::RelativeSize(100.0)).unwrap();
        spans.add(1, 2, SpanKind::RelativeSize(0.0)).unwrap();
        spans.add(2, 3, SpanKind::RelativeSize(f32::NAN)).unwrap();
        assert_eq!(spans.font_sizes(3, 20), vec![255, 1, 20]);
    }

    #[test]
    fn test_color_spans_do_not_affect_layout() {
        let mut spans = SpanList::new();
        spans.add(0, 2, SpanKind::BackgroundColor(Color::BLUE)).unwrap();
        assert!(!spans.affects_layout());
        assert_eq!(spans.font_sizes(3, 16), vec![16, 16, 16]);
        spans.add(0, 2, SpanKind::AbsoluteSize(8)).unwrap();
        assert!(spans.affects_layout());
    }

    #[test]
    fn test_styled_runs_merge() {
        let mut spans = SpanList::new();
        spans.add(1, 3, SpanKind::BackgroundColor(Color::GRAY)).unwrap();
        spans.add(0, 10, SpanKind::ForegroundColor(Color::WHITE)).unwrap();
        let runs = spans.styled_runs(4, Color::BLACK, 16);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].range, 0..1);
        assert_eq!(runs[1].range, 1..3);
        assert_eq!(runs[1].background, Some(Color::GRAY));
        assert!(runs.iter().all(|run| run.color == Color::WHITE));
    }

    #[test]
    fn test_line_background() {
        let mut spans = SpanList::new();
        spans.add(2, 4, SpanKind::LineBackgroundColor(Color::GREEN)).unwrap();
        assert_eq!(spans.line_background(0..3, 10), Some(Color::GREEN));
        assert_eq!(spans.line_background(4..8, 10), None);
        assert_eq!(spans.line_background(3..3, 10), Some(Color::GREEN));
    }

    #[test]
    fn test_empty_text_has_no_runs() {
        let spans = SpanList::new();
        assert!(spans.styled_runs(0, Color::BLACK, 16).is_empty());
    }
}
