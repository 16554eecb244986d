//! Font selection: family name and pixel size.

/// Default font family used when a widget has not been given one.
pub const DEFAULT_FONT_NAME: &str = "HYQiHei-65S";

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: u8 = 18;

/// A font family name and pixel size.
///
/// `Font` does not reference font data; a
/// [`FontMetricsProvider`](super::FontMetricsProvider) resolves it to a
/// [`FontId`](super::FontId) at measurement time.
///
/// # Example
///
/// ```
/// use horizon_lite_render::text::Font;
///
/// let font = Font::new("Inter", 16);
/// let heading = font.with_size(24);
/// assert_eq!(heading.name(), "Inter");
/// assert_eq!(heading.size(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    name: String,
    size: u8,
}

impl Font {
    /// Create a new font with the given family name and pixel size.
    pub fn new(name: impl Into<String>, size: u8) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Get the family name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the size in pixels.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Create a copy of this font with a different size.
    pub fn with_size(&self, size: u8) -> Self {
        Self {
            name: self.name.clone(),
            size,
        }
    }

    /// Whether the font can be resolved at all: a non-empty name and size.
    pub fn is_well_formed(&self) -> bool {
        !self.name.is_empty() && self.size > 0
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_creation() {
        let font = Font::new("Inter", 14);
        assert_eq!(font.name(), "Inter");
        assert_eq!(font.size(), 14);
        assert!(font.is_well_formed());
    }

    #[test]
    fn font_with_size_keeps_name() {
        let font = Font::new("Mono", 12);
        let larger = font.with_size(30);
        assert_eq!(larger.name(), "Mono");
        assert_eq!(larger.size(), 30);
        assert_eq!(font.size(), 12);
    }

    #[test]
    fn malformed_fonts() {
        assert!(!Font::new("", 12).is_well_formed());
        assert!(!Font::new("Inter", 0).is_well_formed());
        assert!(Font::default().is_well_formed());
    }
}
