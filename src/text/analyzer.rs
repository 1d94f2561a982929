//! Single-pass text analysis.
//!
//! [`TextAnalyzer::analyze`] walks the code points once and records which
//! scripts occur, how many letters each contributes, and which characters a
//! single-byte surface cannot show as-is. Language hints are presence-only;
//! weighted scoring belongs to the detector.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use super::classifier::{
    classify, is_emoji, is_emoji_component, is_invisible, is_representable, script_of,
    CodePointClass, Script, TargetEncoding,
};
use super::language::{LanguageCode, LANGUAGE_PROFILES};
use super::replacements::ReplacementTable;

/// Result of analyzing a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    /// Any Latin letter outside ASCII
    pub has_latin_extended: bool,
    /// Any Cyrillic code point
    pub has_cyrillic: bool,
    /// Any problem character that is not a letter (punctuation, currency, emoji)
    pub has_special_chars: bool,
    /// Any emoji
    pub has_emoji: bool,
    /// Scripts present, in order of first appearance
    pub detected_scripts: IndexSet<Script>,
    /// Letters per script, in order of first appearance
    pub script_counts: IndexMap<Script, usize>,
    /// Characters that single-byte rendering would alter
    pub problem_chars: BTreeSet<char>,
    /// Whether any problem character is present
    pub needs_transliteration: bool,
    /// Languages whose diagnostic letters appear
    pub language_hints: IndexSet<LanguageCode>,
    /// Number of code points analyzed
    pub char_count: usize,
    /// Whether the text is pure ASCII
    pub is_ascii: bool,
}

impl TextAnalysis {
    fn empty() -> Self {
        let mut detected_scripts = IndexSet::new();
        detected_scripts.insert(Script::Latin);
        Self {
            has_latin_extended: false,
            has_cyrillic: false,
            has_special_chars: false,
            has_emoji: false,
            detected_scripts,
            script_counts: IndexMap::new(),
            problem_chars: BTreeSet::new(),
            needs_transliteration: false,
            language_hints: IndexSet::new(),
            char_count: 0,
            is_ascii: true,
        }
    }

    /// Total number of letters with a known script.
    pub fn letter_count(&self) -> usize {
        self.script_counts.values().sum()
    }

    /// Share of letters belonging to `script` (0 when there are no letters).
    pub fn script_share(&self, script: Script) -> f32 {
        let total = self.letter_count();
        if total == 0 {
            return 0.0;
        }
        self.script_counts.get(&script).copied().unwrap_or(0) as f32 / total as f32
    }

    /// Share of letters that are not Latin.
    pub fn non_latin_share(&self) -> f32 {
        let total = self.letter_count();
        if total == 0 {
            return 0.0;
        }
        let non_latin: usize = self
            .script_counts
            .iter()
            .filter(|(script, _)| !script.is_latin())
            .map(|(_, count)| *count)
            .sum();
        non_latin as f32 / total as f32
    }

    /// Script with the most letters. Ties go to the script seen first; no
    /// letters at all means Latin.
    pub fn dominant_script(&self) -> Script {
        let mut best: Option<(Script, usize)> = None;
        for (&script, &count) in &self.script_counts {
            match best {
                Some((_, best_count)) if best_count >= count => {},
                _ => best = Some((script, count)),
            }
        }
        best.map(|(script, _)| script).unwrap_or(Script::Latin)
    }

    /// Non-Latin script with the most letters, ties to the one seen first.
    pub fn dominant_non_latin_script(&self) -> Option<Script> {
        let mut best: Option<(Script, usize)> = None;
        for (&script, &count) in self.script_counts.iter().filter(|(s, _)| !s.is_latin()) {
            match best {
                Some((_, best_count)) if best_count >= count => {},
                _ => best = Some((script, count)),
            }
        }
        best.map(|(script, _)| script)
    }

    /// Scripts other than the dominant one whose share exceeds `threshold`.
    pub fn minority_scripts(&self, threshold: f32) -> Vec<(Script, f32)> {
        let dominant = self.dominant_script();
        self.script_counts
            .keys()
            .filter(|&&script| script != dominant)
            .map(|&script| (script, self.script_share(script)))
            .filter(|&(_, share)| share > threshold)
            .collect()
    }
}

/// Text analyzer.
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer {
    replacements: ReplacementTable,
}

impl TextAnalyzer {
    /// Create an analyzer with the built-in replacement table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom replacement table.
    pub fn with_replacements(replacements: ReplacementTable) -> Self {
        Self { replacements }
    }

    /// Replacement table used to flag problem characters.
    pub fn replacements(&self) -> &ReplacementTable {
        &self.replacements
    }

    /// Analyze a string. Empty input yields a zeroed analysis with `{Latin}`.
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        if text.is_empty() {
            return TextAnalysis::empty();
        }

        let mut analysis = TextAnalysis::empty();
        analysis.detected_scripts.clear();

        for ch in text.chars() {
            analysis.char_count += 1;
            let class = classify(ch);

            if class != CodePointClass::Ascii {
                analysis.is_ascii = false;
            }
            match class {
                CodePointClass::LatinExtended if ch.is_alphabetic() => {
                    analysis.has_latin_extended = true
                },
                CodePointClass::Cyrillic => analysis.has_cyrillic = true,
                CodePointClass::Emoji => analysis.has_emoji = true,
                _ => {},
            }

            if let Some(script) = script_of(ch) {
                analysis.detected_scripts.insert(script);
                *analysis.script_counts.entry(script).or_insert(0) += 1;
            }

            if self.is_problem_char(ch) {
                analysis.problem_chars.insert(ch);
                if !ch.is_alphabetic() {
                    analysis.has_special_chars = true;
                }
            }

            for profile in LANGUAGE_PROFILES.iter() {
                if profile.is_diagnostic(ch) {
                    analysis.language_hints.insert(profile.code);
                }
            }
        }

        if analysis.detected_scripts.is_empty() {
            analysis.detected_scripts.insert(Script::Latin);
        }
        analysis.needs_transliteration = !analysis.problem_chars.is_empty();
        analysis
    }

    /// Whether single-byte sanitization would alter this character.
    pub fn is_problem_char(&self, ch: char) -> bool {
        self.replacements.contains(ch)
            || is_emoji(ch)
            || is_emoji_component(ch)
            || is_invisible(ch)
            || !is_representable(ch, TargetEncoding::SingleByte)
    }
}

/// Analyze text with the built-in replacement table.
pub fn analyze(text: &str) -> TextAnalysis {
    TextAnalyzer::new().analyze(text)
}
