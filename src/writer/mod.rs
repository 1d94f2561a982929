//! Renderer integration.
//!
//! ## Architecture
//!
//! ```text
//! FontSetup::setup_font
//!     ↓
//! [FontTarget] (set_active_font, implemented by the renderer)
//!     ↓
//! [DocumentFontContext] (Base-14, declared and embedded fonts → F1, F2, ...)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use glyph_oxide::writer::{DocumentFontContext, FontTarget};
//!
//! let mut context = DocumentFontContext::new();
//! context.register_embedded("NotoSans", std::fs::read("NotoSans-Regular.ttf")?)?;
//! context.set_active_font("NotoSans")?;
//! assert_eq!(context.resource_id("NotoSans"), Some("F1"));
//! ```

mod font_context;

pub use font_context::{DocumentFontContext, FontSource, FontTarget, BASE14_FONTS};
