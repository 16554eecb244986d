//! Fixed-size bitmap font provider.
//!
//! Bitmap faces are rasterized at one size, so every registered face is keyed
//! by `(name, size)` and resolution never scales. A face either covers every
//! character with a uniform advance, or covers only the characters it lists
//! and reports a missing-glyph advance for the rest.

use std::collections::HashMap;

use horizon_lite_core::logging::targets::TEXT as TARGET;
use parking_lot::RwLock;

use super::provider::{FontId, FontMetricsProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Coverage {
    All,
    Listed,
}

/// One bitmap face: a family at a single pixel size.
#[derive(Debug, Clone)]
pub struct BitmapFace {
    name: String,
    size: u8,
    line_height: u16,
    default_advance: u16,
    advances: HashMap<char, u16>,
    coverage: Coverage,
}

impl BitmapFace {
    /// A face covering every character with the same advance.
    pub fn uniform(name: impl Into<String>, size: u8, advance: u16, line_height: u16) -> Self {
        Self {
            name: name.into(),
            size,
            line_height,
            default_advance: advance,
            advances: HashMap::new(),
            coverage: Coverage::All,
        }
    }

    /// A face covering only the glyphs added with [`with_glyph`](Self::with_glyph).
    ///
    /// Characters outside the face draw a missing-glyph box `missing_advance`
    /// pixels wide.
    pub fn sparse(name: impl Into<String>, size: u8, missing_advance: u16, line_height: u16) -> Self {
        Self {
            coverage: Coverage::Listed,
            ..Self::uniform(name, size, missing_advance, line_height)
        }
    }

    /// Set the advance of one glyph. On a sparse face this also adds the glyph.
    pub fn with_glyph(mut self, ch: char, advance: u16) -> Self {
        self.advances.insert(ch, advance);
        self
    }

    /// Set advances for every character of `chars`.
    pub fn with_glyphs(mut self, chars: &str, advance: u16) -> Self {
        self.advances.extend(chars.chars().map(|ch| (ch, advance)));
        self
    }

    /// Family name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixel size this face was rasterized at.
    pub fn size(&self) -> u8 {
        self.size
    }

    fn covers(&self, ch: char) -> bool {
        match self.coverage {
            Coverage::All => true,
            Coverage::Listed => self.advances.contains_key(&ch),
        }
    }

    fn advance(&self, ch: char) -> u16 {
        self.advances
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance)
    }
}

#[derive(Debug, Default)]
struct Registry {
    faces: Vec<BitmapFace>,
    fallbacks: Vec<FontId>,
}

impl Registry {
    fn face(&self, id: FontId) -> Option<&BitmapFace> {
        if !id.is_valid() {
            return None;
        }
        self.faces.get(id.raw() as usize)
    }
}

/// A [`FontMetricsProvider`] over in-memory bitmap faces.
///
/// # Example
///
/// ```
/// use horizon_lite_render::text::{BitmapFace, BitmapFontProvider, FontMetricsProvider};
///
/// let provider = BitmapFontProvider::new()
///     .with_face(BitmapFace::uniform("mono", 16, 8, 20));
///
/// let id = provider.resolve_font_id("mono", 16);
/// assert!(id.is_valid());
/// assert_eq!(provider.glyph_advance('a', id, 16, 0), 8);
/// assert!(!provider.resolve_font_id("mono", 12).is_valid());
/// ```
#[derive(Debug, Default)]
pub struct BitmapFontProvider {
    registry: RwLock<Registry>,
}

impl BitmapFontProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`register_face`](Self::register_face).
    pub fn with_face(self, face: BitmapFace) -> Self {
        self.register_face(face);
        self
    }

    /// Builder form of [`register_fallback`](Self::register_fallback).
    pub fn with_fallback(self, face: BitmapFace) -> Self {
        self.register_fallback(face);
        self
    }

    /// Register a face and return its id.
    ///
    /// Registering the same `(name, size)` twice replaces the face in place
    /// and keeps its id.
    pub fn register_face(&self, face: BitmapFace) -> FontId {
        let mut registry = self.registry.write();
        if let Some(index) = registry
            .faces
            .iter()
            .position(|f| f.name == face.name && f.size == face.size)
        {
            tracing::debug!(target: TARGET, name = %face.name, size = face.size, "replacing bitmap face");
            registry.faces[index] = face;
            return FontId::new(index as u16);
        }

        // u16::MAX is the invalid sentinel.
        if registry.faces.len() >= (u16::MAX as usize) {
            tracing::warn!(target: TARGET, name = %face.name, "bitmap face table full");
            return FontId::INVALID;
        }

        let id = FontId::new(registry.faces.len() as u16);
        tracing::debug!(target: TARGET, name = %face.name, size = face.size, id = id.raw(), "registered bitmap face");
        registry.faces.push(face);
        id
    }

    /// Register a face and append it to the substitution chain.
    ///
    /// Fallbacks are consulted in registration order when a face lacks a glyph.
    pub fn register_fallback(&self, face: BitmapFace) -> FontId {
        let id = self.register_face(face);
        if id.is_valid() {
            let mut registry = self.registry.write();
            if !registry.fallbacks.contains(&id) {
                registry.fallbacks.push(id);
            }
        }
        id
    }

    /// Number of registered faces.
    pub fn face_count(&self) -> usize {
        self.registry.read().faces.len()
    }
}

impl FontMetricsProvider for BitmapFontProvider {
    fn resolve_font_id(&self, name: &str, size: u8) -> FontId {
        if name.is_empty() || size == 0 {
            return FontId::INVALID;
        }
        let registry = self.registry.read();
        registry
            .faces
            .iter()
            .position(|f| f.name == name && f.size == size)
            .map(|index| FontId::new(index as u16))
            .unwrap_or(FontId::INVALID)
    }

    fn glyph_advance(&self, ch: char, font_id: FontId, _font_size: u8, _shaping_id: u8) -> u16 {
        self.registry
            .read()
            .face(font_id)
            .map(|face| face.advance(ch))
            .unwrap_or(0)
    }

    fn line_height(&self, font_id: FontId, _font_size: u8) -> u16 {
        self.registry
            .read()
            .face(font_id)
            .map(|face| face.line_height)
            .unwrap_or(0)
    }

    fn is_vector_font(&self) -> bool {
        false
    }

    fn has_glyph(&self, ch: char, font_id: FontId) -> bool {
        self.registry
            .read()
            .face(font_id)
            .is_some_and(|face| face.covers(ch))
    }

    fn substitute(&self, ch: char, font_id: FontId) -> Option<FontId> {
        let registry = self.registry.read();
        let wanted_size = registry.face(font_id).map(|face| face.size);
        let candidates = || {
            registry
                .fallbacks
                .iter()
                .copied()
                .filter(|&id| id != font_id)
                .filter_map(|id| registry.face(id).map(|face| (id, face)))
                .filter(|(_, face)| face.covers(ch))
        };

        // Prefer a fallback rasterized at the same size.
        candidates()
            .find(|(_, face)| Some(face.size) == wanted_size)
            .or_else(|| candidates().next())
            .map(|(id, _)| id)
    }
}
