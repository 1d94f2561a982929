//! Integration tests for language detection.
//!
//! These tests verify:
//! - detection across the language registry
//! - confidence rules for empty, ASCII and unknown input
//! - fallback languages and warnings
//! - sample building from tabular fragments
//! - cached detection

use std::sync::Arc;

use glyph_oxide::text::language::Direction;
use glyph_oxide::text::{
    analyze, detect_language, DetectionCache, LanguageCode, LanguageDetector,
    MemoryDetectionCache, NoDetectionCache, SampleBuilder, Script,
};
use glyph_oxide::{DetectionConfig, Error};

fn detected(sample: &str) -> LanguageCode {
    detect_language(sample).detected_language
}

/// Registry order pins tie-breaks, so it is part of the contract.
#[test]
fn test_registry_order() {
    let codes: Vec<&str> = glyph_oxide::text::supported_languages()
        .map(|c| c.as_str())
        .collect();
    assert_eq!(
        codes,
        vec!["en", "lv", "lt", "de", "fr", "es", "pl", "ru", "uk", "ar", "zh", "hi"]
    );
}

#[test]
fn test_latvian_scenario() {
    let result = detect_language("Šis ir teksts");
    assert_eq!(result.detected_language, LanguageCode::Lv);
    assert_eq!(result.script, Script::Latin);
    assert!(result.analysis.has_latin_extended);
    assert_eq!(result.fallback_language, LanguageCode::Lt);
    assert!(result.confidence > 0.7);
}

#[test]
fn test_languages_of_the_registry() {
    assert_eq!(detected("Ačiū, labai ačiū už pagalbą"), LanguageCode::Lt);
    assert_eq!(detected("Grüße aus München"), LanguageCode::De);
    assert_eq!(detected("Où est la bibliothèque? Ça va très bien."), LanguageCode::Fr);
    assert_eq!(detected("¿Dónde está el niño?"), LanguageCode::Es);
    assert_eq!(detected("Zażółć gęślą jaźń"), LanguageCode::Pl);
    assert_eq!(detected("Привет, как дела?"), LanguageCode::Ru);
    assert_eq!(detected("Привіт, як справи? Їжак"), LanguageCode::Uk);
    assert_eq!(detected("مرحبا بالعالم"), LanguageCode::Ar);
    assert_eq!(detected("你好世界"), LanguageCode::Zh);
    assert_eq!(detected("नमस्ते दुनिया"), LanguageCode::Hi);
}

#[test]
fn test_direction() {
    assert_eq!(detect_language("مرحبا بالعالم").direction, Direction::Rtl);
    assert_eq!(detect_language("Привет").direction, Direction::Ltr);
}

#[test]
fn test_pure_ascii_is_base_latin() {
    for sample in ["Hello world", "12345", "Invoice #42: total = $10.00", "x"] {
        let result = detect_language(sample);
        assert_eq!(result.detected_language, LanguageCode::En, "{}", sample);
        assert!(result.confidence >= 0.8, "{}", sample);
        assert!(result.confidence <= 1.0, "{}", sample);
    }
}

#[test]
fn test_empty_input() {
    for sample in ["", "   ", "\n\t"] {
        let result = detect_language(sample);
        assert_eq!(result.detected_language, LanguageCode::En);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.warnings.len(), 1);
    }
}

/// Non-ASCII input no language covers gets the unknown confidence.
#[test]
fn test_unknown_script() {
    let result = detect_language("★ ☆ ✓ ∞");
    assert_eq!(result.detected_language, LanguageCode::En);
    assert!((result.confidence - 0.1).abs() < 1e-6);
    assert_eq!(result.fallback_language, LanguageCode::En);
    assert!(result.warnings.iter().any(|w| w.contains("Low confidence")));
}

#[test]
fn test_mixed_script_scenario() {
    let result = detect_language("Merge PDF файлов");
    assert!(result.analysis.detected_scripts.contains(&Script::Latin));
    assert!(result.analysis.detected_scripts.contains(&Script::Cyrillic));
    assert!(result.warnings.iter().any(|w| w.contains("Mixed scripts")));
}

#[test]
fn test_cyrillic_misclassification_warning() {
    // Mostly Latin with a Latvian diacritic and one Cyrillic word
    let result = detect_language("Šis ir ļoti garš teksts ar vārdu да");
    assert_eq!(result.script, Script::Latin);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("Cyrillic text present")));
}

#[test]
fn test_problem_char_warning() {
    let result = detect_language("Price — 10€");
    assert!(result.warnings.iter().any(|w| w.contains("distinct character")));
    assert!(analyze("Price — 10€").needs_transliteration);
}

#[test]
fn test_determinism() {
    let detector = LanguageDetector::new();
    let sample = "Merge PDF файлов — “quick” 😀";
    let first = detector.detect(sample);
    for _ in 0..10 {
        let again = detector.detect(sample);
        assert_eq!(again.detected_language, first.detected_language);
        assert_eq!(again.confidence, first.confidence);
        assert_eq!(again.warnings, first.warnings);
    }
}

#[test]
fn test_scores_are_ranked() {
    let detector = LanguageDetector::new();
    let scores = detector.score_languages("Šis ir teksts");
    assert_eq!(scores.len(), 12);
    assert_eq!(scores[0].language, LanguageCode::Lv);
    for pair in scores.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_sample_is_capped() {
    let config = DetectionConfig::new().with_max_sample_chars(20);
    let detector = LanguageDetector::with_config(config).unwrap();
    let long = format!("{}{}", "a".repeat(20), "ж".repeat(100));
    let result = detector.detect(&long);
    assert_eq!(result.analysis.char_count, 20);
    assert_eq!(result.detected_language, LanguageCode::En);
}

#[test]
fn test_zero_sample_cap_is_rejected() {
    let config = DetectionConfig::new().with_max_sample_chars(0);
    assert!(matches!(LanguageDetector::with_config(config), Err(Error::InvalidConfig(_))));

    let config = DetectionConfig::new().with_max_sample_cells(0);
    assert!(LanguageDetector::with_config(config).is_err());
}

#[test]
fn test_sample_builder() {
    let mut builder = SampleBuilder::new(100, 2);
    builder.push_header("Name");
    builder.push_header("City");
    assert!(builder.push_cell("Jānis"));
    assert!(builder.push_cell("  "));
    assert!(!builder.push_cell("Rīga"));
    assert!(!builder.push_cell("ignored"));
    assert_eq!(builder.cell_count(), 2);
    assert_eq!(builder.build(), "Name City Jānis Rīga");
}

#[test]
fn test_detect_fragments() {
    let detector = LanguageDetector::new();
    let cells = ["Vārds", "Pilsēta", "Jānis", "Rīga"];
    let result = detector.detect_fragments(cells.iter().copied());
    assert_eq!(result.detected_language, LanguageCode::Lv);
}

#[test]
fn test_cached_detection_matches_uncached() {
    let detector = LanguageDetector::new();
    let cache = MemoryDetectionCache::new();

    let cached = detector.detect_cached("  Привет,   мир! ", &cache);
    let again = detector.detect_cached("Привет, мир!", &cache);
    assert!(Arc::ptr_eq(&cached, &again));
    assert_eq!(*cached, detector.detect("Привет, мир!"));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_disabled_cache() {
    let detector = LanguageDetector::new();
    let cache = NoDetectionCache;
    let a = detector.detect_cached("hello", &cache);
    let b = detector.detect_cached("hello", &cache);
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a, b);
}
