//! Font capability catalog.
//!
//! The catalog is injected configuration: it names the fonts a renderer can
//! activate and what each one can show. It is validated once at
//! construction so that resolution can always produce an encoding-safe
//! terminal fallback.
//!
//! # JSON format
//!
//! ```json
//! [
//!   {"font_id": "Helvetica", "supported_scripts": ["latin"],
//!    "quality_rating": "good", "representable_range": "single-byte"},
//!   {"font_id": "NotoSans", "supported_scripts": ["latin", "cyrillic"],
//!    "quality_rating": "excellent", "representable_range": "unicode",
//!    "embedded": true}
//! ]
//! ```

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::classifier::Script;

/// Rendering quality of a font for the scripts it supports.
///
/// Variants are declared best first, so the derived ordering sorts the best
/// font to the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityRating {
    /// Full coverage, hinted, good metrics
    Excellent,
    /// Good coverage
    Good,
    /// Usable
    Basic,
    /// Last resort only
    Poor,
}

/// Which code points a font can be addressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepresentableRange {
    /// Simple font with a single-byte encoding (WinAnsi)
    SingleByte,
    /// Composite font addressed by glyph id
    Unicode,
}

/// What one font identifier can render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontCapability {
    /// Identifier passed to the renderer
    pub font_id: String,
    /// Scripts with adequate glyph coverage
    pub supported_scripts: IndexSet<Script>,
    /// Quality rating
    pub quality_rating: QualityRating,
    /// Encoding range
    pub representable_range: RepresentableRange,
    /// Whether the font has to be embedded into the document to be used
    #[serde(default)]
    pub embedded: bool,
}

impl FontCapability {
    /// Create a capability entry.
    pub fn new<I>(
        font_id: impl Into<String>,
        scripts: I,
        quality_rating: QualityRating,
        representable_range: RepresentableRange,
    ) -> Self
    where
        I: IntoIterator<Item = Script>,
    {
        Self {
            font_id: font_id.into(),
            supported_scripts: scripts.into_iter().collect(),
            quality_rating,
            representable_range,
            embedded: false,
        }
    }

    /// Mark the font as requiring embedding.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Whether the font supports `script`.
    pub fn supports(&self, script: Script) -> bool {
        self.supported_scripts.contains(&script)
    }

    /// Whether the font supports every script in `scripts`.
    pub fn supports_all<'a, I>(&self, scripts: I) -> bool
    where
        I: IntoIterator<Item = &'a Script>,
    {
        scripts.into_iter().all(|s| self.supports(*s))
    }

    /// Whether the font uses a single-byte encoding.
    pub fn is_single_byte(&self) -> bool {
        self.representable_range == RepresentableRange::SingleByte
    }

    /// Whether the font is rated better than poor.
    pub fn is_usable(&self) -> bool {
        self.quality_rating != QualityRating::Poor
    }
}

/// Validated, ordered set of font capabilities.
///
/// Declaration order breaks ties between fonts of equal quality.
#[derive(Debug, Clone, Serialize)]
pub struct FontCatalog {
    fonts: Vec<FontCapability>,
    encoding_safe: usize,
}

impl FontCatalog {
    /// Build a catalog.
    ///
    /// Fails if the catalog is empty, repeats a font id, or has no
    /// single-byte font rated better than poor. A catalog of only poor fonts
    /// is a misconfiguration: there would be no safe font for transliterated
    /// text, so it fails with [`Error::NoEncodingSafeFont`] whatever scripts
    /// it covers.
    pub fn new(fonts: Vec<FontCapability>) -> Result<Self> {
        if fonts.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for font in &fonts {
            if font.font_id.trim().is_empty() {
                return Err(Error::InvalidConfig("font id must not be empty".to_string()));
            }
            if !seen.insert(font.font_id.as_str()) {
                return Err(Error::DuplicateFont(font.font_id.clone()));
            }
        }

        let encoding_safe = Self::rank(&fonts, |f| f.is_single_byte() && f.is_usable())
            .first()
            .copied()
            .ok_or(Error::NoEncodingSafeFont)?;

        log::debug!(
            "Font catalog with {} font(s), encoding-safe fallback {}",
            fonts.len(),
            fonts[encoding_safe].font_id
        );

        Ok(Self {
            fonts,
            encoding_safe,
        })
    }

    /// Load a catalog from a JSON array of capabilities.
    pub fn from_json(json: &str) -> Result<Self> {
        let fonts: Vec<FontCapability> = serde_json::from_str(json)?;
        Self::new(fonts)
    }

    /// Built-in catalog: Base-14 simple fonts plus common embeddable
    /// Unicode families.
    pub fn builtin() -> Self {
        use QualityRating::*;
        use RepresentableRange::*;
        use Script::*;

        let fonts = vec![
            FontCapability::new("Helvetica", [Latin], Good, SingleByte),
            FontCapability::new("Times-Roman", [Latin], Good, SingleByte),
            FontCapability::new("Courier", [Latin], Basic, SingleByte),
            FontCapability::new("NotoSans", [Latin, Cyrillic], Excellent, Unicode).embedded(),
            FontCapability::new("NotoSansCJK", [Cjk, Latin, Cyrillic], Excellent, Unicode)
                .embedded(),
            FontCapability::new("NotoSansArabic", [Arabic, Latin], Excellent, Unicode).embedded(),
            FontCapability::new("NotoSansDevanagari", [Devanagari, Latin], Excellent, Unicode)
                .embedded(),
            FontCapability::new("DejaVuSans", [Latin, Cyrillic], Good, Unicode).embedded(),
            FontCapability::new("Roboto", [Latin, Cyrillic], Good, Unicode).embedded(),
        ];

        Self {
            fonts,
            encoding_safe: 0,
        }
    }

    /// All fonts in declaration order.
    pub fn fonts(&self) -> &[FontCapability] {
        &self.fonts
    }

    /// Look up a font by id.
    pub fn get(&self, font_id: &str) -> Option<&FontCapability> {
        self.fonts.iter().find(|f| f.font_id == font_id)
    }

    /// Number of fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Always `false`: an empty catalog cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Best single-byte font rated better than poor.
    pub fn encoding_safe(&self) -> &FontCapability {
        &self.fonts[self.encoding_safe]
    }

    /// Fonts matching `filter`, best quality first.
    pub fn ranked<F>(&self, filter: F) -> Vec<&FontCapability>
    where
        F: Fn(&FontCapability) -> bool,
    {
        Self::rank(&self.fonts, filter)
            .into_iter()
            .map(|i| &self.fonts[i])
            .collect()
    }

    /// Fonts supporting `script`, best quality first.
    pub fn supporting(&self, script: Script) -> Vec<&FontCapability> {
        self.ranked(|f| f.supports(script))
    }

    // Indices of matching fonts, stable-sorted by quality
    fn rank<F>(fonts: &[FontCapability], filter: F) -> Vec<usize>
    where
        F: Fn(&FontCapability) -> bool,
    {
        let mut indices: Vec<usize> = (0..fonts.len()).filter(|&i| filter(&fonts[i])).collect();
        indices.sort_by_key(|&i| fonts[i].quality_rating);
        indices
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let builtin = FontCatalog::builtin();
        let rebuilt = FontCatalog::new(builtin.fonts().to_vec()).unwrap();
        assert_eq!(rebuilt.encoding_safe().font_id, builtin.encoding_safe().font_id);
        assert_eq!(builtin.encoding_safe().font_id, "Helvetica");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(FontCatalog::new(Vec::new()), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_duplicate_rejected() {
        let fonts = vec![
            FontCapability::new(
                "Helvetica",
                [Script::Latin],
                QualityRating::Good,
                RepresentableRange::SingleByte,
            ),
            FontCapability::new(
                "Helvetica",
                [Script::Latin],
                QualityRating::Basic,
                RepresentableRange::SingleByte,
            ),
        ];
        assert!(matches!(FontCatalog::new(fonts), Err(Error::DuplicateFont(id)) if id == "Helvetica"));
    }

    #[test]
    fn test_requires_encoding_safe_font() {
        let fonts = vec![
            FontCapability::new(
                "NotoSans",
                [Script::Latin, Script::Cyrillic],
                QualityRating::Excellent,
                RepresentableRange::Unicode,
            ),
            FontCapability::new(
                "Scrawl",
                [Script::Latin],
                QualityRating::Poor,
                RepresentableRange::SingleByte,
            ),
        ];
        assert!(matches!(FontCatalog::new(fonts), Err(Error::NoEncodingSafeFont)));
    }

    #[test]
    fn test_supporting_is_ranked_and_stable() {
        let catalog = FontCatalog::builtin();
        let ids: Vec<&str> = catalog
            .supporting(Script::Cyrillic)
            .iter()
            .map(|f| f.font_id.as_str())
            .collect();
        assert_eq!(ids, vec!["NotoSans", "NotoSansCJK", "DejaVuSans", "Roboto"]);
    }

    #[test]
    fn test_encoding_safe_prefers_quality() {
        let fonts = vec![
            FontCapability::new(
                "Courier",
                [Script::Latin],
                QualityRating::Basic,
                RepresentableRange::SingleByte,
            ),
            FontCapability::new(
                "Times-Roman",
                [Script::Latin],
                QualityRating::Good,
                RepresentableRange::SingleByte,
            ),
        ];
        let catalog = FontCatalog::new(fonts).unwrap();
        assert_eq!(catalog.encoding_safe().font_id, "Times-Roman");
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"font_id": "Helvetica", "supported_scripts": ["latin"],
             "quality_rating": "good", "representable_range": "single-byte"},
            {"font_id": "NotoSans", "supported_scripts": ["latin", "cyrillic"],
             "quality_rating": "excellent", "representable_range": "unicode",
             "embedded": true}
        ]"#;
        let catalog = FontCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let noto = catalog.get("NotoSans").unwrap();
        assert!(noto.embedded);
        assert!(noto.supports(Script::Cyrillic));
        assert!(!catalog.get("Helvetica").unwrap().embedded);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(FontCatalog::from_json("{"), Err(Error::Json(_))));
        assert!(matches!(FontCatalog::from_json("[]"), Err(Error::EmptyCatalog)));
    }
}
