//! Integration tests for text sanitization.
//!
//! These tests verify:
//! - diacritic, punctuation, currency and symbol replacement
//! - Cyrillic transliteration and script preservation
//! - emoji and invisible character removal
//! - whitespace normalization and idempotence
//! - WinAnsi encoding of sanitized output

use glyph_oxide::fonts::{encode_winansi, encode_winansi_literal};
use glyph_oxide::text::classifier::{is_representable, TargetEncoding};
use glyph_oxide::text::{sanitize, ReplacementTable, Script, TextSanitizer};

/// "Šis ir teksts" loses its one diacritic.
#[test]
fn test_latvian_sentence() {
    let result = sanitize("Šis ir teksts", None);
    assert_eq!(result.cleaned_text, "Sis ir teksts");
    assert_eq!(result.changed_count, 1);
}

/// Em-dash, smart quote and emoji count as three distinct changes.
#[test]
fn test_dash_quote_emoji_scenario() {
    let result = sanitize("Report — “final 🚀", None);
    assert_eq!(result.cleaned_text, "Report - \"final");
    assert_eq!(result.changed_count, 3);
    assert!(result.changed.contains(&'—'));
    assert!(result.changed.contains(&'“'));
    assert!(result.changed.contains(&'🚀'));
}

#[test]
fn test_cyrillic_with_and_without_preservation() {
    let input = "Привет, мир!";

    let preserved = sanitize(input, Some(Script::Cyrillic));
    assert_eq!(preserved.cleaned_text, input);
    assert_eq!(preserved.changed_count, 0);

    let transliterated = sanitize(input, None);
    assert!(transliterated.changed_count > 0);
    assert!(!transliterated.cleaned_text.contains('П'));
    assert_eq!(transliterated.cleaned_text, "Privet, mir!");
}

/// Changes are counted per distinct code point, not per occurrence.
#[test]
fn test_changed_count_is_distinct() {
    let result = sanitize("ā ā ā — —", None);
    assert_eq!(result.cleaned_text, "a a a - -");
    assert_eq!(result.changed_count, 2);
}

#[test]
fn test_polish_and_lithuanian() {
    assert_eq!(sanitize("Zażółć gęślą jaźń", None).cleaned_text, "Zazólc gesla jazn");
    assert_eq!(sanitize("Ačiū už pagalbą", None).cleaned_text, "Aciu uz pagalba");
}

/// Latin-1 letters are WinAnsi-safe and pass through.
#[test]
fn test_latin1_passthrough() {
    let input = "Grüße aus München, café crème";
    let result = sanitize(input, None);
    assert_eq!(result.cleaned_text, input);
    assert_eq!(result.changed_count, 0);
}

#[test]
fn test_currency_codes() {
    let result = sanitize("10€ / 500₽ / 20₴ / 99₹", None);
    assert_eq!(result.cleaned_text, "10EUR / 500RUB / 20UAH / 99INR");
}

#[test]
fn test_ukrainian_transliteration() {
    let result = sanitize("Їжак і єнот", None);
    assert_eq!(result.cleaned_text, "Yizhak i yenot");
}

#[test]
fn test_soft_signs_vanish() {
    let result = sanitize("объём", None);
    assert_eq!(result.cleaned_text, "obyom");
}

#[test]
fn test_unmapped_scripts_are_removed() {
    let result = sanitize("Total: 你好 مرحبا नमस्ते 42", None);
    assert_eq!(result.cleaned_text, "Total: 42");
    assert!(result.changed_count > 5);
}

#[test]
fn test_preserving_arabic_keeps_arabic_only() {
    let result = sanitize("مرحبا — Привет", Some(Script::Arabic));
    assert_eq!(result.cleaned_text, "مرحبا - Privet");
}

#[test]
fn test_newlines_survive_normalization() {
    let result = sanitize("Line one  \n\n   line two\t\tend\u{200B}", None);
    assert_eq!(result.cleaned_text, "Line one\nline two end");
}

#[test]
fn test_whitespace_only() {
    let result = sanitize(" \t\n ", None);
    assert_eq!(result.cleaned_text, "");
    assert_eq!(result.changed_count, 0);
}

#[test]
fn test_output_is_single_byte() {
    let inputs = [
        "Šis ir teksts — “quoted” … 😀",
        "Привет, мир! № 5 at 20°",
        "混合 text with العربية and हिन्दी",
        "\u{FEFF}bom\u{00AD}soft\u{2060}joiner",
    ];
    for input in inputs {
        let result = sanitize(input, None);
        assert!(
            result
                .cleaned_text
                .chars()
                .all(|c| is_representable(c, TargetEncoding::SingleByte)),
            "{:?} -> {:?}",
            input,
            result.cleaned_text
        );
        assert!(encode_winansi(&result.cleaned_text).is_lossless());
    }
}

#[test]
fn test_idempotent_for_each_preserve_setting() {
    let input = "Šis — “Привет” مرحبا 中文 😀\u{200D}🔥  end";
    let settings = [
        None,
        Some(Script::Latin),
        Some(Script::Cyrillic),
        Some(Script::Arabic),
        Some(Script::Cjk),
        Some(Script::Devanagari),
    ];
    for preserve in settings {
        let once = sanitize(input, preserve);
        let twice = sanitize(&once.cleaned_text, preserve);
        assert_eq!(once.cleaned_text, twice.cleaned_text, "preserve {:?}", preserve);
        assert_eq!(twice.changed_count, 0, "preserve {:?}", preserve);
    }
}

#[test]
fn test_custom_replacements() {
    let table = ReplacementTable::new()
        .with_override('€', "euro")
        .unwrap()
        .with_override('ж', "zh")
        .unwrap();
    let sanitizer = TextSanitizer::with_replacements(table);
    let result = sanitizer.sanitize("5€ жук", None);
    assert_eq!(result.cleaned_text, "5euro zhuk");
}

#[test]
fn test_sanitized_text_as_pdf_literal() {
    let cleaned = sanitize("Café (Zażółć) — ok", None).cleaned_text;
    assert_eq!(cleaned, "Café (Zazólc) - ok");
    assert_eq!(
        encode_winansi_literal(&cleaned),
        "(Caf\\351 \\(Zaz\\363lc\\) - ok)"
    );
}
