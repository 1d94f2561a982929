// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::derivable_impls)]

//! # Glyph Oxide
//!
//! Script detection, font resolution and WinAnsi-safe text sanitization for
//! document generation.
//!
//! Generating a document with a simple single-byte font fails as soon as one
//! code point falls outside WinAnsi. This crate decides which language a set
//! of text samples is in, which font can show it, and how to rewrite the
//! characters the chosen font cannot show, without ever failing the caller.
//!
//! ## Core Features
//!
//! - **Classification**: code point classes, scripts and single-byte
//!   representability
//! - **Language Detection**: coverage and diagnostic-letter scoring over a
//!   fixed registry (en, lv, lt, de, fr, es, pl, ru, uk, ar, zh, hi)
//! - **Font Resolution**: best font for a script from an injected catalog,
//!   with an encoding-safe terminal fallback
//! - **Sanitization**: diacritics, smart punctuation, currency, Cyrillic
//!   transliteration, emoji and invisible character removal
//! - **Setup**: one call that activates a font on a renderer through an
//!   explicit fallback chain and returns the cleaned samples
//!
//! ## Architecture
//!
//! ```text
//! samples ─→ [TextAnalyzer] ─→ [LanguageDetector] ─→ [FontResolver] ─┐
//!                                                                     ↓
//! renderer ←─ [FallbackChain] ←─ [FontSetup] ←─ [TextSanitizer] ←─────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use glyph_oxide::{detect_language, recommend_fonts, sanitize};
//!
//! let detection = detect_language("Šis ir teksts");
//! assert_eq!(detection.detected_language.as_str(), "lv");
//!
//! let fonts = recommend_fonts(&detection);
//! println!("primary font: {}", fonts.primary);
//!
//! let cleaned = sanitize("Šis ir teksts", None);
//! assert_eq!(cleaned.cleaned_text, "Sis ir teksts");
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Text classification, detection and sanitization
pub mod text;

// Font catalog, resolution and encoding
pub mod fonts;

// Renderer integration
pub mod writer;

// Orchestration
pub mod setup;

// Re-exports
pub use config::{DetectionConfig, SetupConfig};
pub use error::{Error, RenderError, Result};
pub use fonts::{
    recommend_fonts, FontCapability, FontCatalog, FontRecommendation, FontResolver, QualityRating,
    RepresentableRange,
};
pub use setup::{setup_font, FontSetup, FontSetupResult, SetupOptions, SetupOutcome, SetupState};
pub use text::{
    detect_language, sanitize, DetectionCache, LanguageCode, LanguageDetectionResult,
    LanguageDetector, MemoryDetectionCache, ReplacementTable, SanitizationResult, Script,
    TextAnalysis, TextAnalyzer, TextSanitizer,
};
pub use writer::{DocumentFontContext, FontTarget};

/// Analyze text with the built-in replacement table.
pub fn analyze_text(text: &str) -> TextAnalysis {
    text::analyze(text)
}

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f32::NAN, f32::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f32::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f32::NAN), Ordering::Less);
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "glyph_oxide");
    }

    #[test]
    fn test_free_functions() {
        let analysis = analyze_text("Привет");
        assert!(analysis.has_cyrillic);

        let detection = detect_language("Привет, как дела?");
        assert_eq!(detection.detected_language, LanguageCode::Ru);

        let fonts = recommend_fonts(&detection);
        assert!(fonts.preserves_script);

        assert_eq!(sanitize("Привет", None).cleaned_text, "Privet");
    }
}
