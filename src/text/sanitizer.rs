//! Character-level sanitization for single-byte rendering.
//!
//! A single pass over the code points:
//!
//! 1. emoji, emoji joiners/selectors and invisible formatting characters are
//!    dropped
//! 2. characters of the preserved script (if any) are kept untouched
//! 3. characters with a replacement table entry are replaced
//! 4. anything else outside the single-byte range is dropped
//!
//! Whitespace is then normalized: every run becomes one space, or one
//! newline if the run contained a line break, and the ends are trimmed.
//! Whitespace normalization is not counted as a change.
//!
//! Sanitization is idempotent for a fixed preserved script.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;

use super::classifier::{
    in_script, is_emoji, is_emoji_component, is_invisible, is_representable, Script,
    TargetEncoding,
};
use super::replacements::ReplacementTable;

lazy_static! {
    /// Any run of Unicode whitespace
    static ref RE_WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Result of sanitizing a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizationResult {
    /// Sanitized text
    pub cleaned_text: String,
    /// Number of distinct original code points altered or removed
    pub changed_count: usize,
    /// Script left untouched, if any
    pub preserved_script: Option<Script>,
    /// The distinct code points that were altered or removed
    pub changed: BTreeSet<char>,
}

impl SanitizationResult {
    /// Whether anything besides whitespace changed.
    pub fn is_modified(&self) -> bool {
        self.changed_count > 0
    }
}

/// Text sanitizer.
#[derive(Debug, Clone, Default)]
pub struct TextSanitizer {
    replacements: ReplacementTable,
}

impl TextSanitizer {
    /// Create a sanitizer with the built-in replacement table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sanitizer with a custom replacement table.
    pub fn with_replacements(replacements: ReplacementTable) -> Self {
        Self { replacements }
    }

    /// Sanitize `text`.
    ///
    /// With `preserve = None` the result is fully single-byte representable.
    /// With `preserve = Some(script)` that script's code points pass through;
    /// only do this when the renderer is known to embed a font for it.
    pub fn sanitize(&self, text: &str, preserve: Option<Script>) -> SanitizationResult {
        let mut out = String::with_capacity(text.len());
        let mut changed = BTreeSet::new();

        for ch in text.chars() {
            if ch.is_whitespace() {
                out.push(ch);
                continue;
            }
            if is_emoji(ch) || is_emoji_component(ch) || is_invisible(ch) {
                changed.insert(ch);
                continue;
            }
            if let Some(script) = preserve {
                if in_script(ch, script) {
                    out.push(ch);
                    continue;
                }
            }
            if let Some(replacement) = self.replacements.lookup(ch) {
                changed.insert(ch);
                out.push_str(replacement);
                continue;
            }
            if is_representable(ch, TargetEncoding::SingleByte) {
                out.push(ch);
            } else {
                changed.insert(ch);
            }
        }

        let cleaned_text = normalize_whitespace(&out);
        if !changed.is_empty() {
            log::trace!("Sanitized {} distinct code point(s)", changed.len());
        }

        SanitizationResult {
            cleaned_text,
            changed_count: changed.len(),
            preserved_script: preserve,
            changed,
        }
    }
}

/// Collapse whitespace runs and trim the ends.
///
/// Runs containing a line break become `\n`, all others a single space.
pub fn normalize_whitespace(text: &str) -> String {
    RE_WHITESPACE_RUN
        .replace_all(text, |caps: &Captures| {
            if caps[0].contains('\n') {
                "\n"
            } else {
                " "
            }
        })
        .trim()
        .to_string()
}

/// Sanitize with the built-in replacement table.
pub fn sanitize(text: &str, preserve: Option<Script>) -> SanitizationResult {
    TextSanitizer::new().sanitize(text, preserve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latvian_diacritics() {
        let result = sanitize("Šis ir teksts", None);
        assert_eq!(result.cleaned_text, "Sis ir teksts");
        assert_eq!(result.changed_count, 1);
        assert!(result.changed.contains(&'Š'));
    }

    #[test]
    fn test_dash_quote_emoji() {
        let result = sanitize("Done — “ok 🎉", None);
        assert_eq!(result.cleaned_text, "Done - \"ok");
        assert_eq!(result.changed_count, 3);
    }

    #[test]
    fn test_cyrillic_preserved() {
        let result = sanitize("Привет, мир!", Some(Script::Cyrillic));
        assert_eq!(result.cleaned_text, "Привет, мир!");
        assert_eq!(result.changed_count, 0);
        assert_eq!(result.preserved_script, Some(Script::Cyrillic));
    }

    #[test]
    fn test_cyrillic_transliterated() {
        let result = sanitize("Привет, мир!", None);
        assert_eq!(result.cleaned_text, "Privet, mir!");
        assert!(result.changed_count > 0);
        assert!(result.cleaned_text.is_ascii());
    }

    #[test]
    fn test_unmapped_scripts_are_dropped() {
        let result = sanitize("Total 中文 ok", None);
        assert_eq!(result.cleaned_text, "Total ok");
        assert_eq!(result.changed_count, 2);
    }

    #[test]
    fn test_latin1_kept() {
        let result = sanitize("café £5 ½", None);
        assert_eq!(result.cleaned_text, "café £5 ½");
        assert!(!result.is_modified());
    }

    #[test]
    fn test_symbols() {
        let result = sanitize("№ 5, 20° C, 100€", None);
        assert_eq!(result.cleaned_text, "No. 5, 20deg C, 100EUR");
        assert_eq!(result.changed_count, 3);
    }

    #[test]
    fn test_invisible_and_whitespace() {
        let result = sanitize("  a\u{200B}b \t\t c\r\n\n d\u{00A0}e  ", None);
        assert_eq!(result.cleaned_text, "ab c\nd e");
        assert_eq!(result.changed_count, 1);
    }

    #[test]
    fn test_emoji_sequences() {
        // Family emoji joined with ZWJ, and a keycap sequence
        let result = sanitize("a👨\u{200D}👩\u{200D}👧b 1\u{FE0F}\u{20E3}", None);
        assert_eq!(result.cleaned_text, "ab 1");
    }

    #[test]
    fn test_preserve_still_drops_emoji() {
        let result = sanitize("Привет 😀", Some(Script::Cyrillic));
        assert_eq!(result.cleaned_text, "Привет");
        assert_eq!(result.changed_count, 1);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Šis ir teksts",
            "Привет — “мир” 😀",
            "a ъ b",
            "x \u{2003} y\u{2028}z",
            "  ",
        ];
        for input in inputs {
            for preserve in [None, Some(Script::Cyrillic), Some(Script::Latin)] {
                let once = sanitize(input, preserve).cleaned_text;
                let twice = sanitize(&once, preserve).cleaned_text;
                assert_eq!(once, twice, "input {:?} preserve {:?}", input, preserve);
            }
        }
    }

    #[test]
    fn test_empty() {
        let result = sanitize("", None);
        assert_eq!(result.cleaned_text, "");
        assert_eq!(result.changed_count, 0);
    }
}
