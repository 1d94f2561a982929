//! Text classification, language detection and sanitization.
//!
//! - [`classifier`]: code point classes and single-byte representability
//! - [`replacements`]: ASCII replacement registry
//! - [`language`]: language registry and profiles
//! - [`analyzer`]: one-pass script and problem character analysis
//! - [`detector`]: language detection, sample building
//! - [`cache`]: detection result cache
//! - [`sanitizer`]: WinAnsi-safe text cleaning

pub mod analyzer;
pub mod cache;
pub mod classifier;
pub mod detector;
pub mod language;
pub mod replacements;
pub mod sanitizer;

pub use analyzer::{analyze, TextAnalysis, TextAnalyzer};
pub use cache::{DetectionCache, MemoryDetectionCache, NoDetectionCache};
pub use classifier::{classify, is_representable, CodePointClass, Script, TargetEncoding};
pub use detector::{
    detect_language, LanguageDetectionResult, LanguageDetector, LanguageScore, SampleBuilder,
};
pub use language::{supported_languages, Direction, LanguageCode, LanguageProfile};
pub use replacements::ReplacementTable;
pub use sanitizer::{sanitize, SanitizationResult, TextSanitizer};
