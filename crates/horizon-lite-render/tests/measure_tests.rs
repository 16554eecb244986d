//! Integration tests for text measurement.

use std::sync::Arc;

use horizon_lite_render::text::{
    BitmapFace, BitmapFontProvider, Font, FontId, FontMetricsProvider, LineBreakMode,
    MeasureRequest, SpanKind, SpanList, TextMeasurer, TextSpacing,
};
use horizon_lite_render::{Size, TextError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fake_provider() -> BitmapFontProvider {
    BitmapFontProvider::new()
        .with_face(BitmapFace::uniform("fake", 10, 6, 12))
        .with_face(BitmapFace::uniform("fake", 18, 9, 22))
        .with_face(BitmapFace::uniform("fake", 38, 19, 45))
}

fn measurer() -> TextMeasurer {
    TextMeasurer::new(Arc::new(fake_provider()))
}

#[test]
fn adapt_sums_glyph_advances() {
    init_tracing();
    let font = Font::new("fake", 10);
    let request = MeasureRequest::new("hello world", &font)
        .bounds(Size::new(200, 20))
        .mode(LineBreakMode::Adapt);
    let result = measurer().measure(&request);
    assert_eq!(result.text_size, Size::new(66, 12));
    assert_eq!(result.lines.len(), 1);
}

#[test]
fn empty_text_measures_zero() {
    let font = Font::new("fake", 10);
    let measurer = measurer();
    for mode in LineBreakMode::ALL {
        let request = MeasureRequest::new("", &font)
            .bounds(Size::new(100, 40))
            .mode(mode);
        let result = measurer.measure(&request);
        assert_eq!(result.text_size, Size::ZERO, "mode {mode:?}");
        assert!(result.lines.is_empty());
        assert_eq!(result.ellipsis_index, None);
    }
}

#[test]
fn absolute_size_span_changes_one_glyph() {
    let font = Font::new("fake", 18);
    let mut spans = SpanList::new();
    spans.add(1, 2, SpanKind::AbsoluteSize(38)).unwrap();

    let plain = measurer().measure(&MeasureRequest::new("abcd", &font));
    let styled = measurer().measure(&MeasureRequest::new("abcd", &font).spans(spans.as_slice()));

    assert_eq!(plain.text_size.width, 4 * 9);
    assert_eq!(styled.text_size.width, 9 + 19 + 9 + 9);
    assert_eq!(styled.text_size.height, 45);
}

#[test]
fn out_of_range_spans_are_clamped() {
    let font = Font::new("fake", 18);
    let mut spans = SpanList::new();
    spans.add(2, 500, SpanKind::AbsoluteSize(38)).unwrap();
    spans.add(100, 200, SpanKind::AbsoluteSize(10)).unwrap();

    let result = measurer().measure(&MeasureRequest::new("abc", &font).spans(spans.as_slice()));
    assert_eq!(result.text_size.width, 9 + 9 + 19);
}

#[test]
fn measurement_is_idempotent() {
    let font = Font::new("fake", 10);
    let measurer = measurer();
    let texts = ["", "a", "hello world", "line one\nline two", "supercalifragilistic", "a  b   c"];
    for text in texts {
        for mode in LineBreakMode::ALL {
            for width in [0, 7, 30, 61, 400] {
                let request = MeasureRequest::new(text, &font)
                    .bounds(Size::new(width, 30))
                    .mode(mode)
                    .spacing(TextSpacing::new(1, 2));
                assert_eq!(measurer.measure(&request), measurer.measure(&request));
            }
        }
    }
}

#[test]
fn ellipsis_prefix_fits_content_width() {
    let font = Font::new("fake", 10);
    let measurer = measurer();
    let marker_width = 6;
    let texts = [
        "hello world",
        "the quick brown fox jumps over the lazy dog",
        "unbreakablewordthatkeepsgoing",
        "two\nhard lines that overflow",
    ];
    for text in texts {
        for width in [6, 13, 25, 40, 57, 90] {
            for height in [12, 24, 30] {
                let request = MeasureRequest::new(text, &font)
                    .bounds(Size::new(width, height))
                    .mode(LineBreakMode::Ellipsis);
                let result = measurer.measure(&request);
                let Some(index) = result.ellipsis_index else {
                    continue;
                };
                let last = result.lines.last().unwrap();
                assert_eq!(last.range.end, index);

                let prefix: String = text.chars().skip(last.range.start).take(index - last.range.start).collect();
                let prefix_width = measurer.text_width(&prefix, &font).unwrap();
                assert!(
                    prefix_width + marker_width <= width,
                    "{text:?} at {width}x{height}: prefix {prefix:?} overflows"
                );
                assert!(result.text_size.height <= height.max(12));
            }
        }
    }
}

#[test]
fn unresolvable_font_is_reported() {
    init_tracing();
    let font = Font::new("nope", 10);
    let err = measurer()
        .try_measure(&MeasureRequest::new("abc", &font))
        .unwrap_err();
    assert_eq!(
        err,
        TextError::FontResolution {
            name: "nope".to_string(),
            size: 10
        }
    );
}

/// A provider with a Latin primary face and a CJK fallback face.
struct SubstitutingProvider;

const LATIN: FontId = FontId::new(0);
const CJK: FontId = FontId::new(1);

impl FontMetricsProvider for SubstitutingProvider {
    fn resolve_font_id(&self, name: &str, _size: u8) -> FontId {
        match name {
            "latin" => LATIN,
            "cjk" => CJK,
            _ => FontId::INVALID,
        }
    }

    fn glyph_advance(&self, ch: char, font_id: FontId, font_size: u8, _shaping_id: u8) -> u16 {
        match (font_id, ch.is_ascii()) {
            (LATIN, true) => font_size as u16 / 2,
            (LATIN, false) => 3,
            (CJK, _) => font_size as u16,
            _ => 0,
        }
    }

    fn line_height(&self, _font_id: FontId, font_size: u8) -> u16 {
        font_size as u16 + 4
    }

    fn is_vector_font(&self) -> bool {
        true
    }

    fn has_glyph(&self, ch: char, font_id: FontId) -> bool {
        font_id == CJK || ch.is_ascii()
    }

    fn substitute(&self, ch: char, font_id: FontId) -> Option<FontId> {
        (font_id == LATIN && !ch.is_ascii()).then_some(CJK)
    }
}

#[test]
fn missing_glyphs_use_substitute_font() {
    let measurer = TextMeasurer::new(Arc::new(SubstitutingProvider));
    let font = Font::new("latin", 20);
    // Two Latin glyphs at 10px and one CJK glyph at 20px.
    assert_eq!(measurer.text_width("ab中", &font), Ok(40));
}

#[test]
fn ellipsis_falls_back_to_ascii_marker() {
    let provider = BitmapFontProvider::new().with_face(
        BitmapFace::sparse("ascii", 10, 6, 12).with_glyphs("abcdefghijklmnopqrstuvwxyz .", 5),
    );
    let measurer = TextMeasurer::new(Arc::new(provider));
    let font = Font::new("ascii", 10);
    let request = MeasureRequest::new("abcdefghij", &font)
        .bounds(Size::new(30, 12))
        .mode(LineBreakMode::Ellipsis);
    let result = measurer.measure(&request);
    // "..." is 15px wide, leaving room for three glyphs.
    assert_eq!(result.ellipsis_index, Some(3));
    assert_eq!(result.lines[0].width, 30);
}
