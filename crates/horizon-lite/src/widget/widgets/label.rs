//! Label widget for text display.
//!
//! The Label widget displays text with support for:
//! - Six line-break modes: adapt, stretch, wrap, ellipsis, marquee and clip
//! - Color and size spans over character ranges
//! - Letter and line spacing, alignment and base direction
//! - Marquee scrolling driven by the shared animator scheduler
//!
//! Measurement is lazy. Mutations mark the label dirty; the next query that
//! depends on the layout (`width`, `height`, `text_width`, `paint_snapshot`,
//! or an explicit [`remeasure`](Label::remeasure)) lays the text out again.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_lite::SharedAnimatorScheduler;
//! use horizon_lite::render::Rect;
//! use horizon_lite::render::text::{BitmapFace, BitmapFontProvider, LineBreakMode};
//! use horizon_lite::widget::widgets::Label;
//!
//! let provider = Arc::new(BitmapFontProvider::new().with_face(BitmapFace::uniform("ui", 16, 8, 20)));
//! let scheduler = SharedAnimatorScheduler::new();
//!
//! let mut label = Label::new(provider, scheduler)
//!     .with_font("ui", 16)
//!     .with_rect(Rect::new(0, 0, 40, 20))
//!     .with_text("Hello, World!")
//!     .with_line_break_mode(LineBreakMode::Ellipsis);
//!
//! assert_eq!(label.displayed_text(), "Hell\u{2026}");
//! ```

use std::ops::Range;
use std::sync::Arc;

use horizon_lite_core::logging::{span_names, targets};
use horizon_lite_core::{AnimatorId, PerfSpan, SharedAnimatorScheduler};
use horizon_lite_render::text::{
    Font, FontMetricsProvider, LineBreakMode, MeasureRequest, MeasureResult, SpanKind, SpanList,
    StyledRun, TextDirection, TextMeasurer, TextSpacing,
};
use horizon_lite_render::{Color, Point, Rect, Size, saturate_i16};

use crate::widget::{Padding, ViewBase};
use crate::widget::animation::{ScrollAnimator, ScrollAnimatorConfig};

/// Horizontal placement of lines inside the content rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of the text block inside the content rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Style properties a label reads when measuring and painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
    /// Text color unless overridden with [`Label::set_text_color`].
    pub text_color: Color,
    /// Padding between the label edge and its text.
    pub padding: Padding,
    /// Extra pixels between adjacent glyphs.
    pub letter_space: i16,
    /// Extra pixels between lines.
    pub line_space: i16,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            text_color: Color::WHITE,
            padding: Padding::ZERO,
            letter_space: 0,
            line_space: 0,
        }
    }
}

impl LabelStyle {
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_letter_space(mut self, letter_space: i16) -> Self {
        self.letter_space = letter_space;
        self
    }

    pub fn with_line_space(mut self, line_space: i16) -> Self {
        self.line_space = line_space;
        self
    }
}

/// Marquee storage: configuration until the first scroll, then the animator.
#[derive(Debug, Clone)]
pub enum MarqueeSlot {
    Config(ScrollAnimatorConfig),
    Animator(ScrollAnimator),
}

impl MarqueeSlot {
    /// The scroll configuration, wherever it currently lives.
    pub fn config(&self) -> ScrollAnimatorConfig {
        match self {
            MarqueeSlot::Config(config) => *config,
            MarqueeSlot::Animator(animator) => animator.config(),
        }
    }

    pub fn animator(&self) -> Option<&ScrollAnimator> {
        match self {
            MarqueeSlot::Animator(animator) => Some(animator),
            MarqueeSlot::Config(_) => None,
        }
    }
}

impl Default for MarqueeSlot {
    fn default() -> Self {
        MarqueeSlot::Config(ScrollAnimatorConfig::default())
    }
}

/// One line ready for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintLine {
    /// Character range drawn on this line.
    pub range: Range<usize>,
    /// Top-left corner of the line in parent coordinates, before scrolling.
    pub origin: Point,
    pub width: i16,
    pub height: i16,
    /// Edge-to-edge fill from a line background span.
    pub background: Option<Color>,
    /// Styled runs covering `range`.
    pub runs: Vec<StyledRun>,
    /// Marker drawn after the last glyph of a truncated line.
    pub ellipsis: Option<String>,
}

/// Everything a renderer needs to draw a label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPaint {
    pub content_rect: Rect,
    /// Horizontal scroll offset while the marquee is active.
    pub scroll_offset: Option<i16>,
    pub direction: TextDirection,
    pub lines: Vec<PaintLine>,
}

/// A widget that displays text.
///
/// The label owns its text, spans, font and line-break mode, and is the only
/// owner of its marquee animator. The animator id is registered with the
/// scheduler while scrolling and unregistered when scrolling stops, when the
/// mode leaves [`LineBreakMode::Marquee`], and when the label is dropped.
pub struct Label {
    base: ViewBase,
    text: String,
    spans: SpanList,
    font: Font,
    mode: LineBreakMode,
    style: LabelStyle,

    text_color_override: Option<Color>,
    /// Resolved text color as of the last remeasure.
    text_color: Color,

    horizontal_align: HorizontalAlign,
    /// Caller's alignment, held while the marquee forces one.
    held_align: Option<HorizontalAlign>,
    vertical_align: VerticalAlign,
    direction_override: Option<TextDirection>,
    direction: TextDirection,

    measurer: TextMeasurer,
    scheduler: SharedAnimatorScheduler,

    needs_remeasure: bool,
    layout: MeasureResult,
    ellipsis_index: Option<usize>,

    scroll_offset: i16,
    marquee: MarqueeSlot,
    animator_id: Option<AnimatorId>,
    /// Last clock value seen from the scheduler.
    clock_ms: u32,
}

impl Label {
    /// Create an empty label measuring with `provider`.
    ///
    /// The label starts in [`LineBreakMode::Ellipsis`] with the default font,
    /// a zero-sized rectangle and the default [`LabelStyle`].
    pub fn new(provider: Arc<dyn FontMetricsProvider>, scheduler: SharedAnimatorScheduler) -> Self {
        Self::with_measurer(TextMeasurer::new(provider), scheduler)
    }

    /// Create an empty label with a preconfigured measurer.
    pub fn with_measurer(measurer: TextMeasurer, scheduler: SharedAnimatorScheduler) -> Self {
        let style = LabelStyle::default();
        let mut base = ViewBase::default();
        base.set_padding(style.padding);

        Self {
            base,
            text: String::new(),
            spans: SpanList::new(),
            font: Font::default(),
            mode: LineBreakMode::default(),
            style,
            text_color_override: None,
            text_color: style.text_color,
            horizontal_align: HorizontalAlign::default(),
            held_align: None,
            vertical_align: VerticalAlign::default(),
            direction_override: None,
            direction: TextDirection::default(),
            measurer,
            scheduler,
            needs_remeasure: true,
            layout: MeasureResult::default(),
            ellipsis_index: None,
            scroll_offset: 0,
            marquee: MarqueeSlot::default(),
            animator_id: None,
            clock_ms: 0,
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_font(mut self, name: &str, size: u8) -> Self {
        self.set_font(name, size);
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.set_style(style);
        self
    }

    pub fn with_line_break_mode(mut self, mode: LineBreakMode) -> Self {
        self.set_line_break_mode(mode);
        self
    }

    pub fn with_scroll_config(mut self, config: ScrollAnimatorConfig) -> Self {
        self.set_scroll_speed(config.speed);
        self.set_scroll_start_pos(config.start_pos);
        self.set_scroll_wait_ticks(config.wait_ticks);
        self
    }

    // =========================================================================
    // Text and font
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Setting the current text again does nothing.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text = text;
        self.invalidate();
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Set the font family and size.
    ///
    /// An empty name or a zero size is ignored and the previous font kept.
    pub fn set_font(&mut self, name: &str, size: u8) {
        if name.is_empty() || size == 0 {
            tracing::warn!(target: targets::LABEL, name, size, "ignoring malformed font");
            return;
        }
        if self.font.name() == name && self.font.size() == size {
            return;
        }
        self.font = Font::new(name, size);
        self.invalidate();
    }

    pub fn set_font_size(&mut self, size: u8) {
        let name = self.font.name().to_string();
        self.set_font(&name, size);
    }

    // =========================================================================
    // Line break mode
    // =========================================================================

    pub fn line_break_mode(&self) -> LineBreakMode {
        self.mode
    }

    /// Switch the line-break mode.
    ///
    /// Leaving marquee stops and unregisters the animator and resets the
    /// scroll offset. Entering marquee remeasures immediately so over-wide
    /// text starts scrolling without waiting for a layout query.
    pub fn set_line_break_mode(&mut self, mode: LineBreakMode) {
        if self.mode == mode {
            return;
        }
        let previous = std::mem::replace(&mut self.mode, mode);
        tracing::debug!(target: targets::LABEL, from = ?previous, to = ?mode, "line break mode changed");

        if previous == LineBreakMode::Marquee {
            self.release_animator();
            self.scroll_offset = 0;
        }
        self.invalidate();
        if mode == LineBreakMode::Marquee {
            self.scroll_offset = self.marquee.config().start_pos;
            self.remeasure();
        }
    }

    /// Switch the mode from its numeric value; unknown values are ignored.
    pub fn set_line_break_mode_value(&mut self, value: u8) {
        match LineBreakMode::try_from(value) {
            Ok(mode) => self.set_line_break_mode(mode),
            Err(err) => tracing::debug!(target: targets::LABEL, error = %err, "line break mode unchanged"),
        }
    }

    // =========================================================================
    // Spans
    // =========================================================================

    pub fn spans(&self) -> &SpanList {
        &self.spans
    }

    pub fn set_background_color_span(&mut self, start: usize, end: usize, color: Color) {
        self.add_span(start, end, SpanKind::BackgroundColor(color));
    }

    pub fn set_foreground_color_span(&mut self, start: usize, end: usize, color: Color) {
        self.add_span(start, end, SpanKind::ForegroundColor(color));
    }

    pub fn set_line_background_color_span(&mut self, start: usize, end: usize, color: Color) {
        self.add_span(start, end, SpanKind::LineBackgroundColor(color));
    }

    pub fn set_absolute_size_span(&mut self, start: usize, end: usize, size: u8) {
        self.add_span(start, end, SpanKind::AbsoluteSize(size));
    }

    pub fn set_relative_size_span(&mut self, start: usize, end: usize, factor: f32) {
        self.add_span(start, end, SpanKind::RelativeSize(factor));
    }

    pub fn clear_spans(&mut self) {
        if !self.spans.is_empty() {
            self.spans.clear();
            self.invalidate();
        }
    }

    fn add_span(&mut self, start: usize, end: usize, kind: SpanKind) {
        match self.spans.add(start, end, kind) {
            Ok(()) => self.invalidate(),
            Err(err) => tracing::warn!(target: targets::LABEL, error = %err, "span dropped"),
        }
    }

    // =========================================================================
    // Style
    // =========================================================================

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: LabelStyle) {
        if self.style == style {
            return;
        }
        self.style = style;
        self.base.set_padding(style.padding);
        self.invalidate();
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.set_style(self.style.with_padding(padding));
    }

    pub fn set_letter_space(&mut self, letter_space: i16) {
        self.set_style(self.style.with_letter_space(letter_space));
    }

    pub fn set_line_space(&mut self, line_space: i16) {
        self.set_style(self.style.with_line_space(line_space));
    }

    /// Effective text color: the override if set, else the style color.
    pub fn text_color(&self) -> Color {
        self.text_color_override.unwrap_or(self.style.text_color)
    }

    pub fn set_text_color(&mut self, color: Color) {
        if self.text_color_override != Some(color) {
            self.text_color_override = Some(color);
            self.invalidate();
        }
    }

    /// Drop the color override and follow the style again.
    pub fn reset_text_color(&mut self) {
        if self.text_color_override.take().is_some() {
            self.invalidate();
        }
    }

    pub fn horizontal_align(&self) -> HorizontalAlign {
        self.horizontal_align
    }

    /// Set horizontal alignment.
    ///
    /// While the marquee scrolls the alignment is forced to the reading start
    /// edge; `align` is kept and applies once scrolling stops.
    pub fn set_horizontal_align(&mut self, align: HorizontalAlign) {
        if let Some(held) = self.held_align.as_mut() {
            *held = align;
            return;
        }
        if self.horizontal_align != align {
            self.horizontal_align = align;
            self.base.update();
        }
    }

    pub fn vertical_align(&self) -> VerticalAlign {
        self.vertical_align
    }

    pub fn set_vertical_align(&mut self, align: VerticalAlign) {
        if self.vertical_align != align {
            self.vertical_align = align;
            self.base.update();
        }
    }

    /// Base direction as of the last remeasure.
    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    /// Force a base direction, or `None` to detect it from the text.
    pub fn set_direction(&mut self, direction: Option<TextDirection>) {
        if self.direction_override != direction {
            self.direction_override = direction;
            self.invalidate();
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn base(&self) -> &ViewBase {
        &self.base
    }

    pub fn rect(&self) -> Rect {
        self.base.rect()
    }

    pub fn set_rect(&mut self, rect: Rect) {
        let resized = rect.size != self.base.size();
        if self.base.set_rect(rect) && resized {
            self.invalidate();
        }
    }

    pub fn set_position(&mut self, x: i16, y: i16) {
        self.base.set_pos(Point::new(x, y));
    }

    pub fn set_size(&mut self, width: i16, height: i16) {
        if self.base.set_size(Size::new(width, height)) {
            self.invalidate();
        }
    }

    pub fn set_width(&mut self, width: i16) {
        if self.base.set_width(width) {
            self.invalidate();
        }
    }

    pub fn set_height(&mut self, height: i16) {
        if self.base.set_height(height) {
            self.invalidate();
        }
    }

    /// Widget width, remeasuring first when the mode sizes the width.
    pub fn width(&mut self) -> i16 {
        if self.needs_remeasure && self.mode.expands_width() {
            self.remeasure();
        }
        self.base.width()
    }

    /// Widget height, remeasuring first when the mode sizes the height.
    pub fn height(&mut self) -> i16 {
        if self.needs_remeasure && self.mode.expands_height() {
            self.remeasure();
        }
        self.base.height()
    }

    /// Measured text width.
    pub fn text_width(&mut self) -> i16 {
        self.ensure_measured();
        self.layout.text_size.width
    }

    /// Measured text extent.
    pub fn text_size(&mut self) -> Size {
        self.ensure_measured();
        self.layout.text_size
    }

    /// Character index where the ellipsis starts, in ellipsis mode.
    pub fn ellipsis_index(&mut self) -> Option<usize> {
        self.ensure_measured();
        self.ellipsis_index
    }

    pub fn needs_remeasure(&self) -> bool {
        self.needs_remeasure
    }

    pub fn needs_repaint(&self) -> bool {
        self.base.needs_repaint()
    }

    /// Clear the repaint flag, returning whether it was set.
    pub fn take_repaint(&mut self) -> bool {
        self.base.take_repaint()
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    fn invalidate(&mut self) {
        self.needs_remeasure = true;
        self.ellipsis_index = None;
        self.base.update();
    }

    fn ensure_measured(&mut self) {
        if self.needs_remeasure {
            self.remeasure();
        }
    }

    fn spacing(&self) -> TextSpacing {
        TextSpacing::new(self.style.letter_space, self.style.line_space)
    }

    /// Lay the text out against the content rectangle and apply the result.
    ///
    /// Resizing done here goes straight to the view base and does not mark
    /// the label dirty again.
    pub fn remeasure(&mut self) {
        self.needs_remeasure = false;
        let _perf = PerfSpan::new(span_names::REMEASURE);

        self.text_color = self.text_color();
        let request = MeasureRequest::new(&self.text, &self.font)
            .spans(self.spans.as_slice())
            .bounds(self.base.content_rect().size)
            .mode(self.mode)
            .spacing(self.spacing());
        let result = self.measurer.measure(&request);

        self.direction = self.direction_override.unwrap_or(result.direction);
        self.ellipsis_index = None;
        let text_size = result.text_size;
        let natural_width = result.natural_width;
        let ellipsis_index = result.ellipsis_index;
        self.layout = result;

        match self.mode {
            LineBreakMode::Adapt => {
                self.base.set_content_width(text_size.width);
                self.base.set_content_height(text_size.height);
            }
            LineBreakMode::Stretch => {
                self.base.set_content_width(text_size.width);
            }
            LineBreakMode::Wrap => {
                self.base.set_content_height(text_size.height);
            }
            LineBreakMode::Ellipsis => self.ellipsis_index = ellipsis_index,
            LineBreakMode::Marquee => self.remeasure_for_marquee(natural_width),
            LineBreakMode::Clip => {}
        }

        tracing::debug!(
            target: targets::LABEL,
            mode = ?self.mode,
            width = text_size.width,
            height = text_size.height,
            ellipsis = ?self.ellipsis_index,
            "label remeasured"
        );
    }

    /// Start, restart or stop the marquee for text `text_width` wide.
    ///
    /// An animator that is already scrolling over the same text and label
    /// widths keeps its offset and timing.
    pub fn remeasure_for_marquee(&mut self, text_width: i16) {
        let label_width = self.base.content_rect().width();
        if text_width <= label_width {
            self.scroll_offset = 0;
            self.release_animator();
            return;
        }

        self.held_align.get_or_insert(self.horizontal_align);
        self.horizontal_align = if self.direction.is_rtl() {
            HorizontalAlign::Right
        } else {
            HorizontalAlign::Left
        };

        // Same extents: a style-only remeasure leaves the scroll where it is.
        if self.animator_id.is_some() {
            if let Some(animator) = self.marquee.animator().filter(|animator| {
                animator.is_active()
                    && animator.text_extent() == text_width
                    && animator.label_extent() == label_width
            }) {
                self.scroll_offset = animator.offset();
                return;
            }
        }

        let config = self.marquee.config();
        self.scroll_offset = config.start_pos;
        if let MarqueeSlot::Animator(animator) = &mut self.marquee {
            animator.update_width(text_width, label_width);
        } else {
            self.marquee = MarqueeSlot::Animator(ScrollAnimator::new(config, text_width, label_width));
        }
        if let MarqueeSlot::Animator(animator) = &mut self.marquee {
            animator.start();
        }

        let id = match self.animator_id {
            Some(id) => id,
            None => {
                let id = self.scheduler.register();
                self.animator_id = Some(id);
                id
            }
        };
        if let Err(err) = self.scheduler.start(id, self.clock_ms) {
            tracing::warn!(target: targets::LABEL, error = %err, "could not start marquee animator");
        }
        tracing::debug!(target: targets::LABEL, text_width, label_width, "marquee started");
        self.base.update();
    }

    fn release_animator(&mut self) {
        if let Some(align) = self.held_align.take() {
            self.horizontal_align = align;
            self.base.update();
        }
        if let MarqueeSlot::Animator(animator) = &mut self.marquee {
            animator.stop();
        }
        if let Some(id) = self.animator_id.take() {
            if let Err(err) = self.scheduler.unregister(id) {
                tracing::warn!(target: targets::LABEL, error = %err, "could not unregister marquee animator");
            }
        }
    }

    // =========================================================================
    // Marquee
    // =========================================================================

    pub fn scroll_offset(&self) -> i16 {
        self.scroll_offset
    }

    pub fn scroll_config(&self) -> ScrollAnimatorConfig {
        self.marquee.config()
    }

    pub fn marquee(&self) -> &MarqueeSlot {
        &self.marquee
    }

    /// The scheduler id of the marquee animator while it is registered.
    pub fn animator_id(&self) -> Option<AnimatorId> {
        self.animator_id
    }

    /// Whether the marquee animator is registered and active.
    pub fn is_scrolling(&self) -> bool {
        self.animator_id.is_some() && self.marquee.animator().is_some_and(ScrollAnimator::is_active)
    }

    pub fn set_scroll_speed(&mut self, speed: u16) {
        match &mut self.marquee {
            MarqueeSlot::Config(config) => config.speed = speed,
            MarqueeSlot::Animator(animator) => animator.set_speed(speed),
        }
    }

    pub fn set_scroll_start_pos(&mut self, start_pos: i16) {
        match &mut self.marquee {
            MarqueeSlot::Config(config) => config.start_pos = start_pos,
            MarqueeSlot::Animator(animator) => animator.set_start_pos(start_pos),
        }
    }

    pub fn set_scroll_wait_ticks(&mut self, wait_ticks: u16) {
        match &mut self.marquee {
            MarqueeSlot::Config(config) => config.wait_ticks = wait_ticks,
            MarqueeSlot::Animator(animator) => animator.set_wait_ticks(wait_ticks),
        }
    }

    /// Advance the marquee to clock value `now`.
    ///
    /// Returns true when the offset moved and a repaint was requested.
    pub fn on_animator_tick(&mut self, now: u32) -> bool {
        self.clock_ms = now;
        if self.mode != LineBreakMode::Marquee {
            return false;
        }
        let MarqueeSlot::Animator(animator) = &mut self.marquee else {
            return false;
        };
        match animator.tick(now) {
            Some(offset) if offset != self.scroll_offset => {
                self.scroll_offset = offset;
                self.base.update();
                true
            }
            _ => false,
        }
    }

    /// Route a scheduler frame: tick if this label's animator is among `due`.
    pub fn handle_frame(&mut self, due: &[AnimatorId], now: u32) -> bool {
        match self.animator_id {
            Some(id) if due.contains(&id) => {
                let _perf = PerfSpan::new(span_names::ANIMATOR_FRAME);
                self.on_animator_tick(now)
            }
            _ => false,
        }
    }

    // =========================================================================
    // Painting
    // =========================================================================

    fn ellipsis_marker(&self) -> &str {
        let provider = self.measurer.provider();
        let font_id = provider.resolve_font_id(self.font.name(), self.font.size());
        self.measurer
            .ellipsis_marker(font_id, self.font.size(), self.style.letter_space as i32)
            .0
    }

    /// The text as it will appear, with the ellipsis applied.
    pub fn displayed_text(&mut self) -> String {
        self.ensure_measured();
        match (self.mode, self.ellipsis_index) {
            (LineBreakMode::Ellipsis, Some(index)) => {
                let mut shown: String = self.text.chars().take(index).collect();
                shown.push_str(self.ellipsis_marker());
                shown
            }
            _ => self.text.clone(),
        }
    }

    /// Lines, runs and positions for a renderer.
    pub fn paint_snapshot(&mut self) -> LabelPaint {
        self.ensure_measured();

        let content = self.base.content_rect();
        let len = self.text.chars().count();
        let runs = self.spans.styled_runs(len, self.text_color, self.font.size());
        let marker = self
            .ellipsis_index
            .map(|_| self.ellipsis_marker().to_string());

        let line_space = self.style.line_space as i32;
        let block_height = self
            .layout
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| line.height as i32 + if index > 0 { line_space } else { 0 })
            .sum::<i32>();
        let mut y = match self.vertical_align {
            VerticalAlign::Top => content.top() as i32,
            VerticalAlign::Center => content.top() as i32 + (content.height() as i32 - block_height) / 2,
            VerticalAlign::Bottom => content.bottom() as i32 - block_height,
        };

        let last = self.layout.lines.len().saturating_sub(1);
        let mut lines = Vec::with_capacity(self.layout.lines.len());
        for (index, line) in self.layout.lines.iter().enumerate() {
            let x = match self.horizontal_align {
                HorizontalAlign::Left => content.left() as i32,
                HorizontalAlign::Center => content.left() as i32 + (content.width() as i32 - line.width as i32) / 2,
                HorizontalAlign::Right => content.right() as i32 - line.width as i32,
            };
            lines.push(PaintLine {
                range: line.range.clone(),
                origin: Point::new(saturate_i16(x), saturate_i16(y)),
                width: line.width,
                height: line.height,
                background: self.spans.line_background(line.range.clone(), len),
                runs: runs_in(&runs, &line.range),
                ellipsis: if index == last { marker.clone() } else { None },
            });
            y += line.height as i32 + line_space;
        }

        LabelPaint {
            content_rect: content,
            scroll_offset: self.is_scrolling().then_some(self.scroll_offset),
            direction: self.direction,
            lines,
        }
    }
}

impl Drop for Label {
    fn drop(&mut self) {
        self.release_animator();
    }
}

impl std::fmt::Debug for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Label")
            .field("text", &self.text)
            .field("font", &self.font)
            .field("mode", &self.mode)
            .field("rect", &self.base.rect())
            .field("scroll_offset", &self.scroll_offset)
            .finish_non_exhaustive()
    }
}

/// The parts of `runs` inside `range`.
fn runs_in(runs: &[StyledRun], range: &Range<usize>) -> Vec<StyledRun> {
    runs.iter()
        .filter_map(|run| {
            let start = run.range.start.max(range.start);
            let end = run.range.end.min(range.end);
            (start < end).then(|| StyledRun {
                range: start..end,
                ..run.clone()
            })
        })
        .collect()
}

static_assertions::assert_impl_all!(Label: Send, Sync);
