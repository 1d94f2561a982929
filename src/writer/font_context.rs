//! Renderer-side font registry.
//!
//! [`FontTarget`] is the one call the setup orchestrator makes on a
//! renderer. [`DocumentFontContext`] is a ready-made implementation for
//! document writers: it knows the PDF Base-14 fonts, accepts declared
//! system fonts and embedded TrueType/OpenType data, and hands out resource
//! names (`F1`, `F2`, ...) in activation order.
//!
//! Base-14 fonts are simple fonts with WinAnsiEncoding, so they only show
//! single-byte text. Embedded fonts are validated with `ttf-parser` at
//! registration and can be asked which characters they cover.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::RenderError;
use crate::fonts::encoding::is_winansi_char;

/// Something that can switch its active font.
pub trait FontTarget {
    /// Make `font_id` the active font.
    fn set_active_font(&mut self, font_id: &str) -> Result<(), RenderError>;
}

impl<T: FontTarget + ?Sized> FontTarget for &mut T {
    fn set_active_font(&mut self, font_id: &str) -> Result<(), RenderError> {
        (**self).set_active_font(font_id)
    }
}

/// PDF Base-14 standard font names.
pub const BASE14_FONTS: [&str; 14] = [
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Symbol",
    "ZapfDingbats",
];

/// Where a registered font comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSource {
    /// Standard font every PDF viewer provides
    Base14,
    /// Font the renderer resolves by name
    System,
    /// Font program embedded in the document
    Embedded,
}

#[derive(Debug, Clone)]
struct RegisteredFont {
    source: FontSource,
    resource_id: Option<String>,
    data: Option<Arc<Vec<u8>>>,
    glyph_count: u16,
}

/// Font registry of one document.
#[derive(Debug, Clone)]
pub struct DocumentFontContext {
    fonts: IndexMap<String, RegisteredFont>,
    active: Option<String>,
    next_font_id: u32,
    embedding_enabled: bool,
}

impl DocumentFontContext {
    /// Create a context with the Base-14 fonts registered.
    pub fn new() -> Self {
        let mut context = Self {
            fonts: IndexMap::new(),
            active: None,
            next_font_id: 1,
            embedding_enabled: true,
        };
        for name in BASE14_FONTS {
            context.insert(name, FontSource::Base14, None, 0);
        }
        context
    }

    /// Disable or enable activation of embedded fonts.
    pub fn with_embedding(mut self, enabled: bool) -> Self {
        self.embedding_enabled = enabled;
        self
    }

    fn insert(
        &mut self,
        name: &str,
        source: FontSource,
        data: Option<Arc<Vec<u8>>>,
        glyph_count: u16,
    ) {
        self.fonts.insert(
            name.to_string(),
            RegisteredFont {
                source,
                resource_id: None,
                data,
                glyph_count,
            },
        );
    }

    /// Declare a font the renderer can resolve by name.
    pub fn declare_font(&mut self, name: &str) {
        if !self.fonts.contains_key(name) {
            log::debug!("Declared system font {}", name);
            self.insert(name, FontSource::System, None, 0);
        }
    }

    /// Register TrueType/OpenType data under `name`.
    ///
    /// The data is parsed once to reject anything that is not a font.
    /// Registering a name again replaces its data and keeps its resource id.
    /// Returns the number of glyphs in the font.
    pub fn register_embedded(&mut self, name: &str, data: Vec<u8>) -> Result<u16, RenderError> {
        let glyph_count = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| RenderError::InvalidFontData {
                font: name.to_string(),
                reason: e.to_string(),
            })?
            .number_of_glyphs();

        let data = Some(Arc::new(data));
        match self.fonts.get_mut(name) {
            Some(existing) => {
                existing.source = FontSource::Embedded;
                existing.data = data;
                existing.glyph_count = glyph_count;
            },
            None => self.insert(name, FontSource::Embedded, data, glyph_count),
        }
        log::info!("Registered embedded font {} ({} glyphs)", name, glyph_count);
        Ok(glyph_count)
    }

    /// Load and register a font file.
    pub fn register_embedded_file(
        &mut self,
        name: &str,
        path: impl AsRef<std::path::Path>,
    ) -> Result<u16, RenderError> {
        let data = std::fs::read(path.as_ref()).map_err(|e| RenderError::InvalidFontData {
            font: name.to_string(),
            reason: e.to_string(),
        })?;
        self.register_embedded(name, data)
    }

    /// Check if a font name corresponds to a Base-14 font.
    pub fn is_base14(&self, name: &str) -> bool {
        self.source(name) == Some(FontSource::Base14)
    }

    /// Source of a registered font.
    pub fn source(&self, name: &str) -> Option<FontSource> {
        self.fonts.get(name).map(|f| f.source)
    }

    /// Glyph count of an embedded font.
    pub fn glyph_count(&self, name: &str) -> Option<u16> {
        self.fonts
            .get(name)
            .filter(|f| f.source == FontSource::Embedded)
            .map(|f| f.glyph_count)
    }

    /// Whether `name` is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Registered font names in registration order.
    pub fn font_names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// Active font, if one was set.
    pub fn active_font(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Resource name assigned to a font once it was first activated.
    pub fn resource_id(&self, name: &str) -> Option<&str> {
        self.fonts.get(name).and_then(|f| f.resource_id.as_deref())
    }

    /// Activated fonts with their resource names, in activation order.
    pub fn used_fonts(&self) -> Vec<(&str, &str)> {
        let mut used: Vec<(&str, &str)> = self
            .fonts
            .iter()
            .filter_map(|(name, f)| f.resource_id.as_deref().map(|id| (name.as_str(), id)))
            .collect();
        used.sort_by_key(|(_, id)| id[1..].parse::<u32>().unwrap_or(u32::MAX));
        used
    }

    /// Whether a font can show every non-whitespace character of `text`.
    ///
    /// Base-14 fonts cover WinAnsi. Embedded fonts are asked for a glyph per
    /// character. System fonts and unknown names give `None`.
    pub fn covers_text(&self, name: &str, text: &str) -> Option<bool> {
        let font = self.fonts.get(name)?;
        let mut chars = text.chars().filter(|c| !c.is_whitespace());
        match font.source {
            FontSource::Base14 => Some(chars.all(is_winansi_char)),
            FontSource::Embedded => {
                let data = font.data.as_ref()?;
                let face = ttf_parser::Face::parse(data, 0).ok()?;
                Some(chars.all(|c| face.glyph_index(c).is_some()))
            },
            FontSource::System => None,
        }
    }

    fn next_font_resource_id(&mut self) -> String {
        let id = format!("F{}", self.next_font_id);
        self.next_font_id += 1;
        id
    }
}

impl Default for DocumentFontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontTarget for DocumentFontContext {
    fn set_active_font(&mut self, font_id: &str) -> Result<(), RenderError> {
        let (source, needs_id) = match self.fonts.get(font_id) {
            Some(font) => (font.source, font.resource_id.is_none()),
            None => return Err(RenderError::FontNotAvailable(font_id.to_string())),
        };

        if source == FontSource::Embedded && !self.embedding_enabled {
            return Err(RenderError::EmbeddingFailed {
                font: font_id.to_string(),
                reason: "embedding is disabled for this document".to_string(),
            });
        }

        if needs_id {
            let id = self.next_font_resource_id();
            if let Some(font) = self.fonts.get_mut(font_id) {
                font.resource_id = Some(id);
            }
        }
        self.active = Some(font_id.to_string());
        log::debug!("Active font: {}", font_id);
        Ok(())
    }
}
