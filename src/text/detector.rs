//! Language detection by character coverage and diagnostic letters.
//!
//! # Scoring
//!
//! For every registered language:
//!
//! 1. coverage = letters inside the language's ranges / sample length
//! 2. + `diacritic_bonus` when one of the language's diagnostic letters occurs
//! 3. + `script_presence_bonus` for non-Latin languages whose script occurs
//!
//! Languages are ranked by the raw sum; ties keep registry order. The
//! reported confidence is the winner's score clamped to `[0, 1]`.
//!
//! Latin languages other than the base language only score once one of
//! their own non-ASCII letters occurs, so plain ASCII text resolves to the
//! base language and nothing else.
//!
//! Detection never fails. Empty input is the only case with confidence 0.

use std::sync::Arc;

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::analyzer::{TextAnalysis, TextAnalyzer};
use super::cache::DetectionCache;
use super::classifier::Script;
use super::language::{supported_languages, Direction, LanguageCode, LANGUAGE_PROFILES};
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::utils::safe_float_cmp;

lazy_static! {
    static ref RE_WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Outcome of language detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageDetectionResult {
    /// Winning language
    pub detected_language: LanguageCode,
    /// Confidence in `[0, 1]`
    pub confidence: f32,
    /// Runner-up, or the base Latin language
    pub fallback_language: LanguageCode,
    /// Script of the winning language
    pub script: Script,
    /// Direction of the winning language
    pub direction: Direction,
    /// Registry codes in priority order
    pub supported_languages: IndexSet<LanguageCode>,
    /// Diagnostics for the caller
    pub warnings: Vec<String>,
    /// Analysis of the (normalized, capped) sample
    pub analysis: TextAnalysis,
}

impl LanguageDetectionResult {
    /// Whether the confidence reaches `threshold`.
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

/// Raw score of one language.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanguageScore {
    /// Language
    pub language: LanguageCode,
    /// Unclamped score
    pub score: f32,
}

/// Language detector.
#[derive(Debug, Clone, Default)]
pub struct LanguageDetector {
    config: DetectionConfig,
    analyzer: TextAnalyzer,
}

impl LanguageDetector {
    /// Create a detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom configuration.
    ///
    /// Fails if the configuration does not validate: a zero sample cap
    /// would empty every sample and confidences outside `[0, 1]` would be
    /// reported as-is.
    pub fn with_config(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            analyzer: TextAnalyzer::new(),
        })
    }

    /// Replace the analyzer (and with it the replacement table).
    pub fn with_analyzer(mut self, analyzer: TextAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Detection configuration.
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Collapse whitespace and cap the sample at `max_sample_chars`.
    ///
    /// Detection runs on this form, so it doubles as the cache key.
    pub fn normalize_sample(&self, sample: &str) -> String {
        let collapsed = RE_WHITESPACE_RUN.replace_all(sample.trim(), " ");
        match collapsed.char_indices().nth(self.config.max_sample_chars) {
            Some((cut, _)) => collapsed[..cut].trim_end().to_string(),
            None => collapsed.into_owned(),
        }
    }

    /// Score every language, best first.
    pub fn score_languages(&self, sample: &str) -> Vec<LanguageScore> {
        let sample = self.normalize_sample(sample);
        let analysis = self.analyzer.analyze(&sample);
        self.rank(&sample, &analysis)
    }

    fn rank(&self, sample: &str, analysis: &TextAnalysis) -> Vec<LanguageScore> {
        let total = analysis.char_count;
        let mut scores: Vec<LanguageScore> = LANGUAGE_PROFILES
            .iter()
            .map(|profile| {
                let mut covered = 0usize;
                let mut own_letters = false;
                let mut diagnostic = false;
                for ch in sample.chars() {
                    if profile.covers(ch) {
                        covered += 1;
                        if !ch.is_ascii() {
                            own_letters = true;
                        }
                    }
                    if profile.is_diagnostic(ch) {
                        diagnostic = true;
                    }
                }

                let needs_own_letters = profile.script.is_latin() && !profile.letters.is_empty();
                if total == 0 || covered == 0 || (needs_own_letters && !own_letters) {
                    return LanguageScore {
                        language: profile.code,
                        score: 0.0,
                    };
                }

                let mut score = covered as f32 / total as f32;
                if diagnostic {
                    score += self.config.diacritic_bonus;
                }
                if !profile.script.is_latin() && analysis.detected_scripts.contains(&profile.script)
                {
                    score += self.config.script_presence_bonus;
                }
                LanguageScore {
                    language: profile.code,
                    score,
                }
            })
            .collect();

        // Stable: equal scores keep registry priority
        scores.sort_by(|a, b| safe_float_cmp(b.score, a.score));
        scores
    }

    /// Detect the language of a sample.
    pub fn detect(&self, sample: &str) -> LanguageDetectionResult {
        let sample = self.normalize_sample(sample);
        self.detect_normalized(&sample)
    }

    fn detect_normalized(&self, sample: &str) -> LanguageDetectionResult {
        let analysis = self.analyzer.analyze(sample);
        let supported: IndexSet<LanguageCode> = supported_languages().collect();
        let base = LanguageCode::BASE_LATIN;

        if analysis.char_count == 0 {
            log::debug!("Empty sample, defaulting to {}", base);
            return LanguageDetectionResult {
                detected_language: base,
                confidence: 0.0,
                fallback_language: base,
                script: base.script(),
                direction: base.profile().direction,
                supported_languages: supported,
                warnings: vec!["No text to analyze; defaulting to en".to_string()],
                analysis,
            };
        }

        let ranked = self.rank(sample, &analysis);
        let top = ranked[0];

        let (detected, confidence) = if analysis.is_ascii {
            let base_score = ranked
                .iter()
                .find(|s| s.language == base)
                .map(|s| s.score)
                .unwrap_or(0.0);
            (base, base_score.max(self.config.ascii_confidence).min(1.0))
        } else if top.score > 0.0 {
            (top.language, top.score.clamp(0.0, 1.0))
        } else {
            (base, self.config.unknown_confidence)
        };

        let fallback = ranked
            .iter()
            .find(|s| s.language != detected && s.score > 0.0)
            .map(|s| s.language)
            .unwrap_or(base);

        let warnings = self.collect_warnings(detected, confidence, &analysis);

        log::debug!(
            "Detected {} (confidence {:.2}, fallback {}) over {} chars",
            detected,
            confidence,
            fallback,
            analysis.char_count
        );

        LanguageDetectionResult {
            detected_language: detected,
            confidence,
            fallback_language: fallback,
            script: detected.script(),
            direction: detected.profile().direction,
            supported_languages: supported,
            warnings,
            analysis,
        }
    }

    fn collect_warnings(
        &self,
        detected: LanguageCode,
        confidence: f32,
        analysis: &TextAnalysis,
    ) -> Vec<String> {
        let mut warnings = Vec::new();

        if confidence < self.config.confidence_threshold {
            warnings.push(format!(
                "Low confidence language detection: {} ({:.0}%)",
                detected,
                confidence * 100.0
            ));
        }

        if !analysis.problem_chars.is_empty() {
            warnings.push(format!(
                "{} distinct character(s) cannot be shown in a single-byte font and will be transliterated or removed",
                analysis.problem_chars.len()
            ));
        }

        if analysis.has_cyrillic && detected.script() != Script::Cyrillic {
            warnings.push(format!(
                "Cyrillic text present but language resolved to {}; detection may be wrong",
                detected
            ));
        }

        let minority = analysis.minority_scripts(self.config.minority_script_share);
        if !minority.is_empty() {
            let names: Vec<&str> = analysis.detected_scripts.iter().map(|s| s.name()).collect();
            warnings.push(format!("Mixed scripts detected: {}", names.join(", ")));
        }

        warnings
    }

    /// Detect through a cache. Results are shared, never recomputed for an
    /// identical normalized sample while cached.
    pub fn detect_cached(
        &self,
        sample: &str,
        cache: &dyn DetectionCache,
    ) -> Arc<LanguageDetectionResult> {
        let key = self.normalize_sample(sample);
        if let Some(hit) = cache.get(&key) {
            log::trace!("Detection cache hit ({} chars)", key.len());
            return hit;
        }
        let result = Arc::new(self.detect_normalized(&key));
        cache.put(key, Arc::clone(&result));
        result
    }

    /// Detect over fragments (column headers, cell values) joined into one
    /// bounded sample.
    pub fn detect_fragments<'a, I>(&self, fragments: I) -> LanguageDetectionResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut builder = SampleBuilder::from_config(&self.config);
        for fragment in fragments {
            if !builder.push_cell(fragment) {
                break;
            }
        }
        self.detect(&builder.build())
    }
}

/// Assembles a bounded detection sample from tabular fragments.
///
/// Headers always go in (subject to the character cap); data cells stop
/// after `max_cells`.
#[derive(Debug, Clone)]
pub struct SampleBuilder {
    max_chars: usize,
    max_cells: usize,
    buffer: String,
    chars: usize,
    cells: usize,
}

impl SampleBuilder {
    /// Create a builder with explicit caps.
    pub fn new(max_chars: usize, max_cells: usize) -> Self {
        Self {
            max_chars,
            max_cells,
            buffer: String::new(),
            chars: 0,
            cells: 0,
        }
    }

    /// Create a builder with the caps from a detection configuration.
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.max_sample_chars, config.max_sample_cells)
    }

    /// Add a column header. Returns `false` once the character cap is hit.
    pub fn push_header(&mut self, header: &str) -> bool {
        self.append(header)
    }

    /// Add a data cell. Returns `false` once either cap is hit.
    pub fn push_cell(&mut self, cell: &str) -> bool {
        if self.cells >= self.max_cells {
            return false;
        }
        if cell.trim().is_empty() {
            return !self.is_full();
        }
        self.cells += 1;
        self.append(cell) && self.cells < self.max_cells
    }

    /// Add many cells, stopping at the first rejection.
    pub fn extend_cells<'a, I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for cell in cells {
            if !self.push_cell(cell) {
                break;
            }
        }
    }

    /// Whether the character cap is reached.
    pub fn is_full(&self) -> bool {
        self.chars >= self.max_chars
    }

    /// Number of data cells accepted so far.
    pub fn cell_count(&self) -> usize {
        self.cells
    }

    /// Finish and return the sample.
    pub fn build(self) -> String {
        self.buffer
    }

    fn append(&mut self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        if self.is_full() {
            return false;
        }
        if fragment.is_empty() {
            return true;
        }
        if !self.buffer.is_empty() {
            self.buffer.push(' ');
            self.chars += 1;
        }
        let room = self.max_chars.saturating_sub(self.chars);
        let taken: String = fragment.chars().take(room).collect();
        self.chars += taken.chars().count();
        self.buffer.push_str(&taken);
        !self.is_full()
    }
}

/// Detect with the default detector.
pub fn detect_language(sample: &str) -> LanguageDetectionResult {
    LanguageDetector::new().detect(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::cache::MemoryDetectionCache;

    #[test]
    fn test_empty_sample() {
        let result = detect_language("");
        assert_eq!(result.detected_language, LanguageCode::En);
        assert_eq!(result.confidence, 0.0);
        assert!(!result.warnings.is_empty());

        let result = detect_language("   \n\t ");
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_pure_ascii_is_base_latin() {
        let result = detect_language("Hello, world! 123");
        assert_eq!(result.detected_language, LanguageCode::En);
        assert!(result.confidence >= 0.8);
        assert_eq!(result.fallback_language, LanguageCode::En);
        assert_eq!(result.script, Script::Latin);
        assert_eq!(result.direction, Direction::Ltr);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_latvian() {
        let result = detect_language("Šis ir teksts");
        assert_eq!(result.detected_language, LanguageCode::Lv);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.fallback_language, LanguageCode::Lt);
        assert!(result.analysis.has_latin_extended);
    }

    #[test]
    fn test_russian_beats_ukrainian_on_ties() {
        let result = detect_language("Привет, мир!");
        assert_eq!(result.detected_language, LanguageCode::Ru);
        assert_eq!(result.fallback_language, LanguageCode::Uk);
        assert_eq!(result.script, Script::Cyrillic);
    }

    #[test]
    fn test_ukrainian_diagnostic_letters() {
        let result = detect_language("Привіт, як справи? Дякую, все добре, ґанок і їжак");
        assert_eq!(result.detected_language, LanguageCode::Uk);
        assert_eq!(result.fallback_language, LanguageCode::Ru);
    }

    #[test]
    fn test_arabic_is_rtl() {
        let result = detect_language("مرحبا بالعالم");
        assert_eq!(result.detected_language, LanguageCode::Ar);
        assert_eq!(result.direction, Direction::Rtl);
    }

    #[test]
    fn test_unknown_script_low_confidence() {
        let result = detect_language("Καλημέρα κόσμε");
        assert_eq!(result.detected_language, LanguageCode::En);
        assert!(result.confidence > 0.0);
        assert!(result.confidence < 0.7);
        assert!(result.warnings.iter().any(|w| w.contains("Low confidence")));
    }

    #[test]
    fn test_mixed_scripts_warning() {
        let result = detect_language("Merge PDF файлов");
        assert!(result.analysis.detected_scripts.contains(&Script::Latin));
        assert!(result.analysis.detected_scripts.contains(&Script::Cyrillic));
        assert!(result.warnings.iter().any(|w| w.contains("Mixed scripts")));
    }

    #[test]
    fn test_cyrillic_misclassification_warning() {
        let detector =
            LanguageDetector::with_config(DetectionConfig::new().with_script_presence_bonus(0.0)).unwrap();
        let result = detector.detect("Quarterly revenue report for the northern region, total: рубль");
        assert_eq!(result.detected_language, LanguageCode::En);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("Cyrillic text present")));
    }

    #[test]
    fn test_ranking_is_stable() {
        let detector = LanguageDetector::new();
        let scores = detector.score_languages("Привет");
        assert_eq!(scores[0].language, LanguageCode::Ru);
        assert_eq!(scores[1].language, LanguageCode::Uk);
        assert_eq!(scores[0].score, scores[1].score);
    }

    #[test]
    fn test_normalize_sample_caps_length() {
        let detector = LanguageDetector::with_config(DetectionConfig::new().with_max_sample_chars(5)).unwrap();
        assert_eq!(detector.normalize_sample("  ab   cd  ef "), "ab cd");
        assert_eq!(detector.normalize_sample("жжжжжжжж"), "жжжжж");
    }

    #[test]
    fn test_with_config_rejects_invalid_values() {
        let zero_cap = DetectionConfig::new().with_max_sample_chars(0);
        assert!(matches!(
            LanguageDetector::with_config(zero_cap),
            Err(crate::error::Error::InvalidConfig(_))
        ));

        let mut loud = DetectionConfig::new();
        loud.unknown_confidence = 1.5;
        assert!(LanguageDetector::with_config(loud).is_err());

        let mut loud = DetectionConfig::new();
        loud.ascii_confidence = 2.0;
        assert!(LanguageDetector::with_config(loud).is_err());
    }

    #[test]
    fn test_sample_builder_caps() {
        let mut builder = SampleBuilder::new(20, 2);
        assert!(builder.push_header("Name"));
        assert!(builder.push_cell("Alice"));
        assert!(builder.push_cell(""));
        assert!(!builder.push_cell("Bob"));
        assert!(!builder.push_cell("Carol"));
        assert_eq!(builder.cell_count(), 2);
        assert_eq!(builder.build(), "Name Alice Bob");

        let mut builder = SampleBuilder::new(8, 100);
        builder.extend_cells(["abcdef", "ghijkl"]);
        let sample = builder.build();
        assert_eq!(sample.chars().count(), 8);
        assert_eq!(sample, "abcdef g");
    }

    #[test]
    fn test_detect_fragments() {
        let detector = LanguageDetector::new();
        let result = detector.detect_fragments(["Vārds", "Uzvārds", "Pilsēta", "Rīga"]);
        assert_eq!(result.detected_language, LanguageCode::Lv);
    }

    #[test]
    fn test_detect_cached_matches_uncached() {
        let detector = LanguageDetector::new();
        let cache = MemoryDetectionCache::new();
        let first = detector.detect_cached("Привет,   мир!", &cache);
        let second = detector.detect_cached("Привет, мир!", &cache);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(*first, detector.detect("Привет, мир!"));
    }
}
