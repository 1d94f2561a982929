//! Font catalog, font resolution and WinAnsi encoding.
//!
//! The catalog describes what each font identifier can render, the resolver
//! picks fonts for a detection result, and the encoding module writes
//! sanitized text with a single-byte font.

pub mod catalog;
pub mod encoding;
pub mod resolver;

pub use catalog::{FontCapability, FontCatalog, QualityRating, RepresentableRange};
pub use encoding::{encode_winansi, encode_winansi_literal, is_winansi_char, unicode_to_winansi};
pub use resolver::{
    recommend_fonts, FontRecommendation, FontResolver, MultiScriptAdvice, ScriptShare,
};
