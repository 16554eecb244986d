//! Text measurement and line breaking.
//!
//! [`TextMeasurer`] turns a string, its size spans and a content rectangle
//! into line boundaries and an integer pixel extent under one of the
//! [`LineBreakMode`] policies. Measurement is a pure function of its inputs
//! and the provider's metrics, so measuring twice yields the same result.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_lite_render::Size;
//! use horizon_lite_render::text::{
//!     BitmapFace, BitmapFontProvider, Font, LineBreakMode, MeasureRequest, TextMeasurer,
//! };
//!
//! let provider = BitmapFontProvider::new().with_face(BitmapFace::uniform("mono", 16, 10, 20));
//! let measurer = TextMeasurer::new(Arc::new(provider));
//! let font = Font::new("mono", 16);
//!
//! let request = MeasureRequest::new("hello world", &font)
//!     .bounds(Size::new(60, 100))
//!     .mode(LineBreakMode::Wrap);
//! let result = measurer.measure(&request);
//!
//! assert_eq!(result.lines.len(), 2);
//! assert_eq!(result.text_size, Size::new(60, 40));
//! assert_eq!(result.natural_width, 110);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use horizon_lite_core::logging::targets::TEXT as TARGET;
use unicode_segmentation::UnicodeSegmentation;

use super::bidi::{TextDirection, detect_base_direction};
use super::font::Font;
use super::provider::{DEFAULT_SHAPING_ID, FontId, FontMetricsProvider, can_render, glyph_font};
use super::span::{TextSpan, font_sizes};
use crate::error::{TextError, TextResult};
use crate::types::{Size, saturate_i16};

/// How a label fits its text into the content rectangle.
///
/// The numeric values are stable and used by [`TryFrom<u8>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LineBreakMode {
    /// Resize both axes to the natural text extent.
    Adapt = 0,
    /// Resize the width to the natural text width; height is fixed.
    Stretch = 1,
    /// Wrap at the content width and resize the height.
    Wrap = 2,
    /// Wrap at the content width and truncate with an ellipsis.
    #[default]
    Ellipsis = 3,
    /// Keep one line and scroll it horizontally when too wide.
    Marquee = 4,
    /// Wrap at the content width and cut whatever does not fit.
    Clip = 5,
}

impl LineBreakMode {
    /// All modes in numeric order.
    pub const ALL: [LineBreakMode; 6] = [
        LineBreakMode::Adapt,
        LineBreakMode::Stretch,
        LineBreakMode::Wrap,
        LineBreakMode::Ellipsis,
        LineBreakMode::Marquee,
        LineBreakMode::Clip,
    ];

    /// Whether a width query must remeasure first: the mode either resizes
    /// the width or, for marquee, derives its scroll extent from it.
    pub fn expands_width(self) -> bool {
        matches!(
            self,
            LineBreakMode::Adapt | LineBreakMode::Stretch | LineBreakMode::Marquee
        )
    }

    /// Whether a height query must remeasure first.
    pub fn expands_height(self) -> bool {
        matches!(self, LineBreakMode::Adapt | LineBreakMode::Wrap)
    }

    /// Whether lines are broken at the content width.
    pub fn is_width_bounded(self) -> bool {
        matches!(
            self,
            LineBreakMode::Wrap | LineBreakMode::Ellipsis | LineBreakMode::Clip
        )
    }
}

impl TryFrom<u8> for LineBreakMode {
    type Error = TextError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(TextError::InvalidMode(value))
    }
}

impl From<LineBreakMode> for u8 {
    fn from(mode: LineBreakMode) -> Self {
        mode as u8
    }
}

/// Extra pixels between glyphs and between lines. Both may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSpacing {
    pub letter: i16,
    pub line: i16,
}

impl TextSpacing {
    pub const fn new(letter: i16, line: i16) -> Self {
        Self { letter, line }
    }
}

/// Inputs to one measurement.
#[derive(Debug, Clone, Copy)]
pub struct MeasureRequest<'a> {
    /// Text to measure.
    pub text: &'a str,
    /// Base font.
    pub font: &'a Font,
    /// Style spans; only size spans influence measurement.
    pub spans: &'a [TextSpan],
    /// Content rectangle size.
    pub bounds: Size,
    /// Fitting policy.
    pub mode: LineBreakMode,
    /// Letter and line spacing.
    pub spacing: TextSpacing,
}

impl<'a> MeasureRequest<'a> {
    /// A request with no spans, zero bounds and [`LineBreakMode::Adapt`].
    pub fn new(text: &'a str, font: &'a Font) -> Self {
        Self {
            text,
            font,
            spans: &[],
            bounds: Size::ZERO,
            mode: LineBreakMode::Adapt,
            spacing: TextSpacing::default(),
        }
    }

    pub fn spans(mut self, spans: &'a [TextSpan]) -> Self {
        self.spans = spans;
        self
    }

    pub fn bounds(mut self, bounds: Size) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn mode(mut self, mode: LineBreakMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn spacing(mut self, spacing: TextSpacing) -> Self {
        self.spacing = spacing;
        self
    }
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    /// Character range, excluding the hard line break.
    pub range: Range<usize>,
    /// Width in pixels; on a truncated line this includes the ellipsis.
    pub width: i16,
    /// Height in pixels (the tallest glyph's line height).
    pub height: i16,
}

/// Output of a measurement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasureResult {
    /// Extent of the laid-out text.
    pub text_size: Size,
    /// Width of the widest hard line, unwrapped.
    pub natural_width: i16,
    /// Visible lines, top to bottom.
    pub lines: Vec<LineInfo>,
    /// Character index where the ellipsis replaces the rest of the text.
    pub ellipsis_index: Option<usize>,
    /// Paragraph direction of the text.
    pub direction: TextDirection,
}

impl MeasureResult {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.ellipsis_index.is_some()
    }
}

/// Measurer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurerConfig {
    /// Marker drawn after truncated text.
    pub ellipsis: String,
    /// Marker used when the font cannot draw [`ellipsis`](Self::ellipsis).
    pub fallback_ellipsis: String,
}

impl Default for MeasurerConfig {
    fn default() -> Self {
        Self {
            ellipsis: "\u{2026}".to_string(),
            fallback_ellipsis: "...".to_string(),
        }
    }
}

impl MeasurerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ellipsis(mut self, marker: impl Into<String>) -> Self {
        self.ellipsis = marker.into();
        self
    }

    pub fn fallback_ellipsis(mut self, marker: impl Into<String>) -> Self {
        self.fallback_ellipsis = marker.into();
        self
    }
}

/// Measures text against a content rectangle.
pub struct TextMeasurer {
    provider: Arc<dyn FontMetricsProvider>,
    config: MeasurerConfig,
}

impl fmt::Debug for TextMeasurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextMeasurer")
            .field("vector", &self.provider.is_vector_font())
            .field("config", &self.config)
            .finish()
    }
}

impl TextMeasurer {
    /// Create a measurer with the default configuration.
    pub fn new(provider: Arc<dyn FontMetricsProvider>) -> Self {
        Self::with_config(provider, MeasurerConfig::default())
    }

    pub fn with_config(provider: Arc<dyn FontMetricsProvider>, config: MeasurerConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &Arc<dyn FontMetricsProvider> {
        &self.provider
    }

    pub fn config(&self) -> &MeasurerConfig {
        &self.config
    }

    /// Measure, degrading any failure to an empty result.
    ///
    /// Failures are logged at warn level; callers that need to tell an
    /// unresolvable font from empty text should use
    /// [`try_measure`](Self::try_measure).
    pub fn measure(&self, request: &MeasureRequest<'_>) -> MeasureResult {
        match self.try_measure(request) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(target: TARGET, error = %err, "text measurement failed");
                MeasureResult::default()
            }
        }
    }

    /// Measure, reporting font resolution failures.
    pub fn try_measure(&self, request: &MeasureRequest<'_>) -> TextResult<MeasureResult> {
        let font = request.font;
        let base_id = self.provider.resolve_font_id(font.name(), font.size());
        if !base_id.is_valid() {
            return Err(TextError::FontResolution {
                name: font.name().to_string(),
                size: font.size(),
            });
        }

        let direction = detect_base_direction(request.text);
        if request.text.is_empty() {
            return Ok(MeasureResult {
                direction,
                ..MeasureResult::default()
            });
        }
        if request.mode.is_width_bounded() && request.bounds.width <= 0 {
            tracing::debug!(target: TARGET, mode = ?request.mode, "no content width to lay out into");
            return Ok(MeasureResult {
                direction,
                ..MeasureResult::default()
            });
        }

        let layout = self.shape(request, base_id);
        let hard_lines = layout.hard_lines();
        let natural: Vec<Line> = hard_lines.iter().map(|range| layout.line(range.clone())).collect();
        let natural_width = max_width(&natural);
        let max_line_width = request.bounds.width as i32;

        let (lines, ellipsis_index, height) = match request.mode {
            LineBreakMode::Adapt => {
                let height = layout.stacked_height(&natural);
                (natural, None, height)
            }
            LineBreakMode::Stretch | LineBreakMode::Marquee => {
                (natural, None, request.bounds.height as i32)
            }
            LineBreakMode::Wrap | LineBreakMode::Clip => {
                let wrapped = layout.wrap(&hard_lines, max_line_width);
                let height = layout.stacked_height(&wrapped);
                (wrapped, None, height)
            }
            LineBreakMode::Ellipsis => {
                let wrapped = layout.wrap(&hard_lines, max_line_width);
                let (visible, index) = self.ellipsize(&layout, wrapped, request.bounds, base_id, font.size());
                let height = layout.stacked_height(&visible);
                (visible, index, height)
            }
        };

        let width = match request.mode {
            LineBreakMode::Adapt | LineBreakMode::Stretch | LineBreakMode::Marquee => natural_width,
            _ => max_width(&lines),
        };

        let result = MeasureResult {
            text_size: Size::new(to_pixels(width), to_pixels(height)),
            natural_width: to_pixels(natural_width),
            lines: lines.into_iter().map(Line::into_info).collect(),
            ellipsis_index,
            direction,
        };
        tracing::trace!(
            target: TARGET,
            mode = ?request.mode,
            width = result.text_size.width,
            height = result.text_size.height,
            lines = result.lines.len(),
            ellipsis = ?result.ellipsis_index,
            "measured text"
        );
        Ok(result)
    }

    /// Natural (unwrapped) width of `text` in `font`.
    pub fn text_width(&self, text: &str, font: &Font) -> TextResult<i16> {
        Ok(self.try_measure(&MeasureRequest::new(text, font))?.natural_width)
    }

    /// Line height of `font`, or zero if it does not resolve.
    pub fn line_height(&self, font: &Font) -> i16 {
        let id = self.provider.resolve_font_id(font.name(), font.size());
        if !id.is_valid() {
            return 0;
        }
        saturate_i16(self.provider.line_height(id, font.size()) as i32)
    }

    /// The ellipsis marker `font_id` can draw, and its width.
    pub fn ellipsis_marker(&self, font_id: FontId, font_size: u8, letter: i32) -> (&str, i32) {
        let provider = self.provider.as_ref();
        let marker = if self
            .config
            .ellipsis
            .chars()
            .all(|ch| can_render(provider, ch, font_id))
        {
            self.config.ellipsis.as_str()
        } else {
            self.config.fallback_ellipsis.as_str()
        };

        (marker, self.marker_width(marker, font_id, font_size, letter))
    }

    fn marker_width(&self, marker: &str, font_id: FontId, font_size: u8, letter: i32) -> i32 {
        let provider = self.provider.as_ref();
        let mut width = 0i32;
        for (index, ch) in marker.chars().enumerate() {
            if index > 0 {
                width = width.saturating_add(letter);
            }
            let advance = provider.glyph_advance(ch, glyph_font(provider, ch, font_id), font_size, DEFAULT_SHAPING_ID);
            width = width.saturating_add(advance as i32);
        }
        width
    }

    fn shape(&self, request: &MeasureRequest<'_>, base_id: FontId) -> Layout {
        let provider = self.provider.as_ref();
        let font = request.font;
        let chars: Vec<char> = request.text.chars().collect();
        let sizes = font_sizes(request.spans, chars.len(), font.size());

        let mut resolved: HashMap<u8, (FontId, u8)> = HashMap::new();
        resolved.insert(font.size(), (base_id, font.size()));

        let mut glyphs = Vec::with_capacity(chars.len());
        for (&ch, &size) in chars.iter().zip(&sizes) {
            let (font_id, font_size) = *resolved.entry(size).or_insert_with(|| {
                let id = provider.resolve_font_id(font.name(), size);
                if id.is_valid() {
                    (id, size)
                } else {
                    tracing::debug!(target: TARGET, name = font.name(), size, "span size unavailable, using base size");
                    (base_id, font.size())
                }
            });
            let advance = if ch == '\n' {
                0
            } else {
                let id = glyph_font(provider, ch, font_id);
                provider.glyph_advance(ch, id, font_size, DEFAULT_SHAPING_ID) as i32
            };
            glyphs.push(Glyph {
                advance,
                font: (font_id, font_size),
                line_height: provider.line_height(font_id, font_size) as i32,
            });
        }

        let mut boundaries = vec![false; chars.len() + 1];
        let mut offset = 0;
        for grapheme in request.text.graphemes(true) {
            boundaries[offset] = true;
            offset += grapheme.chars().count();
        }
        boundaries[chars.len()] = true;

        Layout {
            chars,
            glyphs,
            boundaries,
            letter: request.spacing.letter as i32,
            line_spacing: request.spacing.line as i32,
            base_line_height: provider.line_height(base_id, font.size()) as i32,
        }
    }

    /// Keep the lines that fit vertically and truncate the last one.
    fn ellipsize(
        &self,
        layout: &Layout,
        mut lines: Vec<Line>,
        bounds: Size,
        base_id: FontId,
        base_size: u8,
    ) -> (Vec<Line>, Option<usize>) {
        let max_height = bounds.height as i32;
        let mut used = 0i32;
        let mut visible = 0;
        for (index, line) in lines.iter().enumerate() {
            let gap = if index > 0 { layout.line_spacing } else { 0 };
            let next = used.saturating_add(gap).saturating_add(line.height);
            if next > max_height {
                break;
            }
            used = next;
            visible += 1;
        }
        let visible = visible.max(1);
        if visible >= lines.len() {
            return (lines, None);
        }
        lines.truncate(visible);

        // The marker is drawn at the size of the glyph it follows.
        let (marker, base_marker_width) = self.ellipsis_marker(base_id, base_size, layout.letter);
        let mut marker_widths: HashMap<(FontId, u8), i32> = HashMap::new();
        let mut marker_after = |index: usize| {
            let (font_id, font_size) = layout.glyphs[index].font;
            *marker_widths
                .entry((font_id, font_size))
                .or_insert_with(|| self.marker_width(marker, font_id, font_size, layout.letter))
        };
        let max_width = bounds.width as i32;
        let Some(last) = lines.last_mut() else {
            return (lines, None);
        };

        // The truncated line may reach past its wrap point, up to the next hard break.
        let start = last.range.start;
        let tail_end = layout.hard_line_end(start);
        let mut cut = start;
        let mut cut_width = 0i32;
        let mut cut_marker_width = base_marker_width;
        let mut width = 0i32;
        for index in start..tail_end {
            width = if index == start {
                layout.glyphs[index].advance
            } else {
                width
                    .saturating_add(layout.letter)
                    .saturating_add(layout.glyphs[index].advance)
            };
            let marker_width = marker_after(index);
            if width.saturating_add(layout.letter).saturating_add(marker_width) > max_width {
                break;
            }
            if layout.boundaries[index + 1] {
                cut = index + 1;
                cut_width = width;
                cut_marker_width = marker_width;
            }
        }

        last.range = start..cut;
        last.width = if cut > start {
            cut_width
                .saturating_add(layout.letter)
                .saturating_add(cut_marker_width)
        } else {
            base_marker_width
        };
        tracing::trace!(target: TARGET, visible, index = cut, "ellipsis applied");
        (lines, Some(cut))
    }
}

#[derive(Debug, Clone, Copy)]
struct Glyph {
    advance: i32,
    /// Resolved font and size after span sizes apply.
    font: (FontId, u8),
    line_height: i32,
}

#[derive(Debug, Clone)]
struct Line {
    range: Range<usize>,
    width: i32,
    height: i32,
}

impl Line {
    fn into_info(self) -> LineInfo {
        LineInfo {
            range: self.range,
            width: to_pixels(self.width),
            height: to_pixels(self.height),
        }
    }
}

fn max_width(lines: &[Line]) -> i32 {
    lines.iter().map(|line| line.width).max().unwrap_or(0)
}

fn to_pixels(value: i32) -> i16 {
    saturate_i16(value.max(0))
}

/// A line being filled by the greedy breaker.
struct LineBuilder {
    start: usize,
    end: usize,
    width: i32,
}

impl LineBuilder {
    fn new(start: usize) -> Self {
        Self {
            start,
            end: start,
            width: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.end == self.start
    }

    fn joined(&self, width: i32, letter: i32) -> i32 {
        if self.is_empty() {
            width
        } else {
            self.width.saturating_add(letter).saturating_add(width)
        }
    }

    fn fits(&self, width: i32, letter: i32, max_width: i32) -> bool {
        self.joined(width, letter) <= max_width
    }

    fn extend(&mut self, range: Range<usize>, width: i32, letter: i32) {
        self.width = self.joined(width, letter);
        self.end = range.end;
    }
}

/// Per-measurement glyph metrics.
struct Layout {
    chars: Vec<char>,
    glyphs: Vec<Glyph>,
    /// `boundaries[i]` is true when a grapheme cluster starts at char `i`.
    boundaries: Vec<bool>,
    letter: i32,
    line_spacing: i32,
    base_line_height: i32,
}

impl Layout {
    fn width(&self, range: Range<usize>) -> i32 {
        let count = range.len() as i32;
        if count == 0 {
            return 0;
        }
        self.glyphs[range]
            .iter()
            .fold(0i32, |acc, glyph| acc.saturating_add(glyph.advance))
            .saturating_add(self.letter.saturating_mul(count - 1))
    }

    fn height(&self, range: Range<usize>) -> i32 {
        self.glyphs[range]
            .iter()
            .map(|glyph| glyph.line_height)
            .max()
            .unwrap_or(self.base_line_height)
    }

    fn line(&self, range: Range<usize>) -> Line {
        Line {
            width: self.width(range.clone()),
            height: self.height(range.clone()),
            range,
        }
    }

    fn stacked_height(&self, lines: &[Line]) -> i32 {
        lines.iter().enumerate().fold(0i32, |acc, (index, line)| {
            let gap = if index > 0 { self.line_spacing } else { 0 };
            acc.saturating_add(gap).saturating_add(line.height)
        })
    }

    /// Ranges between hard line breaks. A trailing break yields an empty last line.
    fn hard_lines(&self) -> Vec<Range<usize>> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (index, &ch) in self.chars.iter().enumerate() {
            if ch == '\n' {
                lines.push(start..index);
                start = index + 1;
            }
        }
        lines.push(start..self.chars.len());
        lines
    }

    fn hard_line_end(&self, from: usize) -> usize {
        self.chars[from..]
            .iter()
            .position(|&ch| ch == '\n')
            .map_or(self.chars.len(), |offset| from + offset)
    }

    fn wrap(&self, hard_lines: &[Range<usize>], max_width: i32) -> Vec<Line> {
        let mut lines = Vec::new();
        for range in hard_lines {
            self.wrap_hard_line(range.clone(), max_width, &mut lines);
        }
        lines
    }

    /// Greedy breaking at word boundaries, falling back to grapheme
    /// boundaries inside a word wider than the line.
    fn wrap_hard_line(&self, range: Range<usize>, max_width: i32, out: &mut Vec<Line>) {
        if range.is_empty() {
            out.push(self.line(range));
            return;
        }

        let text: String = self.chars[range.clone()].iter().collect();
        let mut builder = LineBuilder::new(range.start);
        let mut offset = range.start;
        for segment in text.split_word_bounds() {
            let seg = offset..offset + segment.chars().count();
            offset = seg.end;
            let seg_width = self.width(seg.clone());

            if builder.fits(seg_width, self.letter, max_width) {
                builder.extend(seg, seg_width, self.letter);
                continue;
            }

            // Whitespace hangs past the edge and ends the line.
            if !builder.is_empty() && segment.chars().all(char::is_whitespace) {
                builder.end = seg.end;
                out.push(self.finish(&builder));
                builder = LineBuilder::new(seg.end);
                continue;
            }

            if !builder.is_empty() {
                out.push(self.finish(&builder));
                builder = LineBuilder::new(seg.start);
            }
            if seg_width <= max_width {
                builder.extend(seg, seg_width, self.letter);
                continue;
            }

            let mut cluster_start = seg.start;
            for grapheme in segment.graphemes(true) {
                let cluster = cluster_start..cluster_start + grapheme.chars().count();
                cluster_start = cluster.end;
                let cluster_width = self.width(cluster.clone());
                if !builder.is_empty() && !builder.fits(cluster_width, self.letter, max_width) {
                    out.push(self.finish(&builder));
                    builder = LineBuilder::new(cluster.start);
                }
                builder.extend(cluster, cluster_width, self.letter);
            }
        }
        if !builder.is_empty() {
            out.push(self.finish(&builder));
        }
    }

    fn finish(&self, builder: &LineBuilder) -> Line {
        Line {
            range: builder.start..builder.end,
            width: builder.width,
            height: self.height(builder.start..builder.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{BitmapFace, BitmapFontProvider, SpanKind, SpanList};

    fn measurer() -> TextMeasurer {
        let provider = BitmapFontProvider::new()
            .with_face(BitmapFace::uniform("mono", 16, 10, 20))
            .with_face(BitmapFace::uniform("mono", 32, 20, 40));
        TextMeasurer::new(Arc::new(provider))
    }

    fn font() -> Font {
        Font::new("mono", 16)
    }

    #[test]
    fn test_mode_values() {
        for (value, mode) in LineBreakMode::ALL.iter().enumerate() {
            assert_eq!(LineBreakMode::try_from(value as u8), Ok(*mode));
            assert_eq!(u8::from(*mode), value as u8);
        }
        assert_eq!(LineBreakMode::try_from(6), Err(TextError::InvalidMode(6)));
        assert_eq!(LineBreakMode::default(), LineBreakMode::Ellipsis);
    }

    #[test]
    fn test_mode_axes() {
        use LineBreakMode::*;
        let widths: Vec<_> = LineBreakMode::ALL.iter().map(|m| m.expands_width()).collect();
        let heights: Vec<_> = LineBreakMode::ALL.iter().map(|m| m.expands_height()).collect();
        assert_eq!(widths, vec![true, true, false, false, true, false]);
        assert_eq!(heights, vec![true, false, true, false, false, false]);
        assert!(Clip.is_width_bounded() && !Marquee.is_width_bounded());
    }

    #[test]
    fn test_adapt_uses_natural_extent() {
        let font = font();
        let result = measurer().measure(&MeasureRequest::new("abc\nde", &font));
        assert_eq!(result.text_size, Size::new(30, 40));
        assert_eq!(result.natural_width, 30);
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[1].range, 4..6);
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let font = font();
        let result = measurer().measure(&MeasureRequest::new("ab\n", &font));
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[1].range, 3..3);
        assert_eq!(result.text_size.height, 40);
    }

    #[test]
    fn test_spacing() {
        let font = font();
        let request = MeasureRequest::new("abc\nd", &font).spacing(TextSpacing::new(2, 5));
        let result = measurer().measure(&request);
        assert_eq!(result.text_size, Size::new(34, 45));
    }

    #[test]
    fn test_stretch_and_marquee_keep_content_height() {
        let font = font();
        for mode in [LineBreakMode::Stretch, LineBreakMode::Marquee] {
            let request = MeasureRequest::new("hello world", &font)
                .bounds(Size::new(40, 24))
                .mode(mode);
            let result = measurer().measure(&request);
            assert_eq!(result.text_size, Size::new(110, 24));
            assert_eq!(result.lines.len(), 1);
            assert_eq!(result.ellipsis_index, None);
        }
    }

    #[test]
    fn test_wrap_breaks_at_words() {
        let font = font();
        let request = MeasureRequest::new("aa bb cc", &font)
            .bounds(Size::new(40, 0))
            .mode(LineBreakMode::Wrap);
        let result = measurer().measure(&request);
        let ranges: Vec<_> = result.lines.iter().map(|l| l.range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..8]);
        assert!(result.lines.iter().all(|line| line.width <= 40));
        assert_eq!(result.text_size.height, 60);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let font = font();
        let request = MeasureRequest::new("abcdefg", &font)
            .bounds(Size::new(30, 0))
            .mode(LineBreakMode::Wrap);
        let result = measurer().measure(&request);
        let ranges: Vec<_> = result.lines.iter().map(|l| l.range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn test_wrap_lets_whitespace_hang() {
        let font = font();
        let request = MeasureRequest::new("abc def", &font)
            .bounds(Size::new(30, 0))
            .mode(LineBreakMode::Wrap);
        let result = measurer().measure(&request);
        assert_eq!(result.lines[0].range, 0..4);
        assert_eq!(result.lines[0].width, 30);
        assert_eq!(result.lines[1].range, 4..7);
    }

    #[test]
    fn test_ellipsis_truncates_last_visible_line() {
        let font = font();
        // Marker "…" is 10px wide; 55px leaves room for 4 glyphs plus the marker.
        let request = MeasureRequest::new("abcdefghij", &font)
            .bounds(Size::new(55, 20))
            .mode(LineBreakMode::Ellipsis);
        let result = measurer().measure(&request);
        assert_eq!(result.ellipsis_index, Some(4));
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].width, 50);
        assert_eq!(result.text_size, Size::new(50, 20));
    }

    #[test]
    fn test_ellipsis_keeps_lines_that_fit() {
        let font = font();
        let request = MeasureRequest::new("aaa bbb ccc", &font)
            .bounds(Size::new(40, 45))
            .mode(LineBreakMode::Ellipsis);
        let result = measurer().measure(&request);
        assert_eq!(result.lines.len(), 2);
        // Second line "bbb ccc" truncated to "bbb" + marker.
        assert_eq!(result.ellipsis_index, Some(7));
        assert_eq!(result.text_size.height, 40);
    }

    #[test]
    fn test_ellipsis_not_applied_when_everything_fits() {
        let font = font();
        let request = MeasureRequest::new("abc", &font)
            .bounds(Size::new(100, 20))
            .mode(LineBreakMode::Ellipsis);
        let result = measurer().measure(&request);
        assert_eq!(result.ellipsis_index, None);
        assert_eq!(result.text_size, Size::new(30, 20));
    }

    #[test]
    fn test_ellipsis_marker_wider_than_content() {
        let font = font();
        let request = MeasureRequest::new("abcdef", &font)
            .bounds(Size::new(5, 20))
            .mode(LineBreakMode::Ellipsis);
        let result = measurer().measure(&request);
        assert_eq!(result.ellipsis_index, Some(0));
    }

    #[test]
    fn test_fallback_marker_without_glyph() {
        let provider = BitmapFontProvider::new().with_face(
            BitmapFace::sparse("latin", 16, 10, 20).with_glyphs("abcdefghij.", 10),
        );
        let measurer = TextMeasurer::new(Arc::new(provider));
        let id = measurer.provider().resolve_font_id("latin", 16);
        let (marker, width) = measurer.ellipsis_marker(id, 16, 0);
        assert_eq!(marker, "...");
        assert_eq!(width, 30);
    }

    #[test]
    fn test_clip_wraps_without_truncation() {
        let font = font();
        let request = MeasureRequest::new("aaa bbb ccc", &font)
            .bounds(Size::new(40, 20))
            .mode(LineBreakMode::Clip);
        let result = measurer().measure(&request);
        assert_eq!(result.lines.len(), 3);
        assert_eq!(result.ellipsis_index, None);
    }

    #[test]
    fn test_zero_width_bounded_modes() {
        let font = font();
        for mode in [LineBreakMode::Wrap, LineBreakMode::Ellipsis, LineBreakMode::Clip] {
            let request = MeasureRequest::new("abc", &font).bounds(Size::new(0, 50)).mode(mode);
            let result = measurer().measure(&request);
            assert_eq!(result.text_size, Size::ZERO);
            assert!(result.lines.is_empty());
        }
    }

    #[test]
    fn test_size_spans_change_metrics() {
        let font = font();
        let mut spans = SpanList::new();
        spans.add(1, 2, SpanKind::AbsoluteSize(32)).unwrap();
        spans.add(0, 3, SpanKind::ForegroundColor(crate::Color::RED)).unwrap();
        let request = MeasureRequest::new("abc", &font).spans(spans.as_slice());
        let result = measurer().measure(&request);
        assert_eq!(result.text_size, Size::new(40, 40));
    }

    #[test]
    fn test_ellipsis_marker_follows_span_size() {
        let font = font();
        let mut spans = SpanList::new();
        spans.add(4, 8, SpanKind::AbsoluteSize(32)).unwrap();
        let request = MeasureRequest::new("abcdefgh", &font)
            .spans(spans.as_slice())
            .bounds(Size::new(95, 40))
            .mode(LineBreakMode::Ellipsis);
        let result = measurer().measure(&request);
        // "abcd" at 10px, "e" at 20px, then a 20px marker.
        assert_eq!(result.ellipsis_index, Some(5));
        assert_eq!(result.lines[0].width, 80);

        let plain = MeasureRequest::new("abcdefghijkl", &font)
            .bounds(Size::new(95, 20))
            .mode(LineBreakMode::Ellipsis);
        let result = measurer().measure(&plain);
        assert_eq!(result.ellipsis_index, Some(8));
        assert_eq!(result.lines[0].width, 90);
    }

    #[test]
    fn test_unavailable_span_size_uses_base() {
        let font = font();
        let mut spans = SpanList::new();
        spans.add(0, 3, SpanKind::AbsoluteSize(99)).unwrap();
        let request = MeasureRequest::new("abc", &font).spans(spans.as_slice());
        assert_eq!(measurer().measure(&request).text_size, Size::new(30, 20));
    }

    #[test]
    fn test_unresolved_font() {
        let font = Font::new("missing", 16);
        let request = MeasureRequest::new("abc", &font);
        let measurer = measurer();
        assert!(matches!(
            measurer.try_measure(&request),
            Err(TextError::FontResolution { .. })
        ));
        assert_eq!(measurer.measure(&request), MeasureResult::default());
    }

    #[test]
    fn test_width_saturates() {
        let provider = BitmapFontProvider::new().with_face(BitmapFace::uniform("wide", 16, 60_000, 20));
        let measurer = TextMeasurer::new(Arc::new(provider));
        let font = Font::new("wide", 16);
        assert_eq!(measurer.text_width("abc", &font), Ok(i16::MAX));
    }

    #[test]
    fn test_direction_reported() {
        let font = font();
        let result = measurer().measure(&MeasureRequest::new("שלום", &font));
        assert_eq!(result.direction, TextDirection::RightToLeft);
    }
}
