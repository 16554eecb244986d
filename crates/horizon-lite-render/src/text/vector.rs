//! Scalable font provider backed by TrueType/OpenType data.
//!
//! Font bytes are held in memory and parsed with `ttf-parser` on each query.
//! Parsing only reads table offsets, so the per-query cost is small and no
//! borrowed face has to outlive the registry lock.

use std::sync::Arc;

use horizon_lite_core::logging::targets::TEXT as TARGET;
use parking_lot::RwLock;
use ttf_parser::{Face, GlyphId};

use super::provider::{FontId, FontMetricsProvider};
use crate::error::{TextError, TextResult};

/// Vertical metrics of a face, in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorMetrics {
    /// Font units per em.
    pub units_per_em: u16,
    /// Baseline to top of the tallest glyph.
    pub ascent: i16,
    /// Baseline to bottom of the lowest glyph (typically negative).
    pub descent: i16,
    /// Recommended extra spacing between lines.
    pub line_gap: i16,
}

impl VectorMetrics {
    fn from_face(face: &Face<'_>) -> Self {
        Self {
            units_per_em: face.units_per_em(),
            ascent: face.ascender(),
            descent: face.descender(),
            line_gap: face.line_gap(),
        }
    }

    /// Line height in font units.
    pub fn line_height_units(&self) -> i32 {
        self.ascent as i32 - self.descent as i32 + self.line_gap as i32
    }

    /// Scale a font-unit value to whole pixels at `font_size`, rounding to
    /// nearest and clamping into `u16`.
    pub fn scale(&self, units: i32, font_size: u8) -> u16 {
        if self.units_per_em == 0 || units <= 0 {
            return 0;
        }
        let upem = self.units_per_em as i64;
        let scaled = (units as i64 * font_size as i64 + upem / 2) / upem;
        scaled.clamp(0, u16::MAX as i64) as u16
    }
}

#[derive(Debug)]
struct VectorFace {
    name: String,
    data: Arc<[u8]>,
    index: u32,
    metrics: VectorMetrics,
}

impl VectorFace {
    fn with_face<R>(&self, f: impl FnOnce(&Face<'_>) -> R) -> Option<R> {
        match Face::parse(&self.data, self.index) {
            Ok(face) => Some(f(&face)),
            Err(err) => {
                tracing::warn!(target: TARGET, name = %self.name, error = %err, "font data no longer parses");
                None
            }
        }
    }
}

/// A [`FontMetricsProvider`] over scalable font files.
///
/// Families are registered from raw font bytes. One id serves every size;
/// glyph advances and line heights are scaled from font units on demand.
/// When a face lacks a glyph, the other registered faces are tried in
/// registration order.
#[derive(Debug, Default)]
pub struct VectorFontProvider {
    faces: RwLock<Vec<VectorFace>>,
}

impl VectorFontProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the first face of a font file under `name`.
    pub fn register_font(&self, name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> TextResult<FontId> {
        self.register_font_index(name, data, 0)
    }

    /// Register face `index` of a font collection under `name`.
    ///
    /// The data is parsed once here so malformed fonts are rejected up front.
    pub fn register_font_index(
        &self,
        name: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
        index: u32,
    ) -> TextResult<FontId> {
        let name = name.into();
        let data = data.into();
        let metrics = VectorMetrics::from_face(&Face::parse(&data, index)?);
        if metrics.units_per_em == 0 {
            return Err(TextError::FontData(format!("'{name}' reports zero units per em")));
        }

        let mut faces = self.faces.write();
        if faces.len() >= (u16::MAX as usize) {
            return Err(TextError::FontData("vector face table full".to_string()));
        }
        let face = VectorFace {
            name,
            data,
            index,
            metrics,
        };
        if let Some(slot) = faces.iter().position(|f| f.name == face.name) {
            tracing::debug!(target: TARGET, name = %face.name, "replacing vector face");
            faces[slot] = face;
            return Ok(FontId::new(slot as u16));
        }

        let id = FontId::new(faces.len() as u16);
        tracing::debug!(
            target: TARGET,
            name = %face.name,
            id = id.raw(),
            units_per_em = metrics.units_per_em,
            "registered vector face"
        );
        faces.push(face);
        Ok(id)
    }

    /// Vertical metrics of a registered face.
    pub fn metrics(&self, font_id: FontId) -> Option<VectorMetrics> {
        self.get(font_id, |face| face.metrics)
    }

    /// Number of registered faces.
    pub fn face_count(&self) -> usize {
        self.faces.read().len()
    }

    fn get<R>(&self, font_id: FontId, f: impl FnOnce(&VectorFace) -> R) -> Option<R> {
        if !font_id.is_valid() {
            return None;
        }
        self.faces.read().get(font_id.raw() as usize).map(f)
    }
}

impl FontMetricsProvider for VectorFontProvider {
    fn resolve_font_id(&self, name: &str, size: u8) -> FontId {
        if name.is_empty() || size == 0 {
            return FontId::INVALID;
        }
        self.faces
            .read()
            .iter()
            .position(|f| f.name == name)
            .map(|index| FontId::new(index as u16))
            .unwrap_or(FontId::INVALID)
    }

    fn glyph_advance(&self, ch: char, font_id: FontId, font_size: u8, _shaping_id: u8) -> u16 {
        self.get(font_id, |face| {
            face.with_face(|parsed| {
                // Missing glyphs advance by the .notdef box.
                let glyph = parsed.glyph_index(ch).unwrap_or(GlyphId(0));
                let units = parsed.glyph_hor_advance(glyph).unwrap_or(0);
                face.metrics.scale(units as i32, font_size)
            })
        })
        .flatten()
        .unwrap_or(0)
    }

    fn line_height(&self, font_id: FontId, font_size: u8) -> u16 {
        self.get(font_id, |face| face.metrics.scale(face.metrics.line_height_units(), font_size))
            .unwrap_or(0)
    }

    fn is_vector_font(&self) -> bool {
        true
    }

    fn has_glyph(&self, ch: char, font_id: FontId) -> bool {
        self.get(font_id, |face| face.with_face(|parsed| parsed.glyph_index(ch).is_some()))
            .flatten()
            .unwrap_or(false)
    }

    fn substitute(&self, ch: char, font_id: FontId) -> Option<FontId> {
        let faces = self.faces.read();
        faces
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != font_id.raw() as usize)
            .find(|(_, face)| {
                face.with_face(|parsed| parsed.glyph_index(ch).is_some())
                    .unwrap_or(false)
            })
            .map(|(index, _)| FontId::new(index as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_data() {
        let provider = VectorFontProvider::new();
        let result = provider.register_font("broken", vec![0u8; 16]);
        assert!(matches!(result, Err(TextError::FontData(_))));
        assert_eq!(provider.face_count(), 0);
    }

    #[test]
    fn test_unknown_family_is_invalid() {
        let provider = VectorFontProvider::new();
        assert!(!provider.resolve_font_id("Inter", 16).is_valid());
        assert_eq!(provider.glyph_advance('a', FontId::INVALID, 16, 0), 0);
        assert_eq!(provider.line_height(FontId::new(3), 16), 0);
        assert!(!provider.has_glyph('a', FontId::new(0)));
        assert_eq!(provider.substitute('a', FontId::new(0)), None);
        assert!(provider.is_vector_font());
    }

    #[test]
    fn test_metrics_scaling() {
        let metrics = VectorMetrics {
            units_per_em: 1000,
            ascent: 800,
            descent: -200,
            line_gap: 100,
        };
        assert_eq!(metrics.line_height_units(), 1100);
        assert_eq!(metrics.scale(1100, 20), 22);
        // 500 * 15 / 1000 = 7.5 rounds up.
        assert_eq!(metrics.scale(500, 15), 8);
        assert_eq!(metrics.scale(-10, 20), 0);
    }

    #[test]
    fn test_zero_upem_scales_to_zero() {
        let metrics = VectorMetrics {
            units_per_em: 0,
            ascent: 800,
            descent: -200,
            line_gap: 0,
        };
        assert_eq!(metrics.scale(1000, 20), 0);
    }
}
