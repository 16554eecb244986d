//! The font metrics contract consumed by text measurement.

/// Identifier of a resolved font face.
///
/// Bitmap fonts are size specific, so one family at two sizes resolves to two
/// ids. Vector fonts resolve one id per family and take the size per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(u16);

impl FontId {
    /// Sentinel returned when resolution fails.
    pub const INVALID: Self = Self(u16::MAX);

    /// Wrap a raw provider index.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw provider index.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Whether this id refers to a face.
    pub const fn is_valid(self) -> bool {
        self.0 != u16::MAX
    }
}

/// Shaping id passed for unshaped (one code point, one glyph) text.
pub const DEFAULT_SHAPING_ID: u8 = 0;

/// Supplies glyph sizing and font identity to the text measurer.
///
/// Providers are shared by every label in the process, so they must be
/// `Send + Sync`; registration after sharing goes through interior locking.
/// None of the methods may panic on unknown ids: they return the invalid
/// sentinel or zero metrics instead.
pub trait FontMetricsProvider: Send + Sync {
    /// Resolve a family name and pixel size to a font id.
    ///
    /// Returns [`FontId::INVALID`] for unknown families or unsupported sizes.
    fn resolve_font_id(&self, name: &str, size: u8) -> FontId;

    /// Pixel advance width of one glyph.
    ///
    /// `shaping_id` selects a shaped glyph variant for complex scripts;
    /// [`DEFAULT_SHAPING_ID`] means unshaped.
    fn glyph_advance(&self, ch: char, font_id: FontId, font_size: u8, shaping_id: u8) -> u16;

    /// Line height of the font in pixels.
    fn line_height(&self, font_id: FontId, font_size: u8) -> u16;

    /// Whether the provider serves scalable (vector) fonts.
    fn is_vector_font(&self) -> bool;

    /// Whether `font_id` contains a glyph for `ch`.
    fn has_glyph(&self, _ch: char, _font_id: FontId) -> bool {
        true
    }

    /// A font that can render `ch` when `font_id` cannot.
    fn substitute(&self, _ch: char, _font_id: FontId) -> Option<FontId> {
        None
    }
}

/// Pick the font that will actually render `ch`: the requested font when it
/// covers the character, otherwise its substitute, otherwise the requested
/// font anyway (which then draws its missing-glyph box).
pub fn glyph_font(provider: &dyn FontMetricsProvider, ch: char, font_id: FontId) -> FontId {
    if provider.has_glyph(ch, font_id) {
        return font_id;
    }
    match provider.substitute(ch, font_id) {
        Some(substitute) if substitute.is_valid() => {
            tracing::trace!(
                target: horizon_lite_core::logging::targets::TEXT,
                ch = %ch.escape_unicode(),
                from = font_id.raw(),
                to = substitute.raw(),
                "font substitution"
            );
            substitute
        }
        _ => font_id,
    }
}

/// Whether `ch` can be drawn by `font_id` or one of its substitutes.
pub fn can_render(provider: &dyn FontMetricsProvider, ch: char, font_id: FontId) -> bool {
    provider.has_glyph(ch, font_id)
        || provider
            .substitute(ch, font_id)
            .is_some_and(|substitute| substitute.is_valid())
}
