//! Font recommendation for a detection result.
//!
//! Resolution never fails: the catalog guarantees an encoding-safe font, and
//! the fallback list always holds at least one entry.

use indexmap::IndexSet;
use serde::Serialize;

use super::catalog::{FontCapability, FontCatalog};
use crate::config::check_unit;
use crate::error::Result;
use crate::text::analyzer::TextAnalysis;
use crate::text::classifier::Script;
use crate::text::detector::LanguageDetectionResult;

/// Default share of letters above which a non-dominant script counts.
pub const DEFAULT_MINORITY_SHARE: f32 = 0.1;

/// Share of letters held by one minority script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScriptShare {
    /// Script
    pub script: Script,
    /// Share of letters in `[0, 1]`
    pub share: f32,
}

/// Secondary recommendation for samples mixing scripts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiScriptAdvice {
    /// Every script with letters in the sample, in order of appearance
    pub scripts: Vec<Script>,
    /// Non-dominant scripts above the minority share
    pub minority: Vec<ScriptShare>,
    /// Fonts supporting all of `scripts`, best first (may be empty)
    pub fonts: Vec<String>,
}

/// Fonts recommended for a detection result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontRecommendation {
    /// Preferred font
    pub primary: String,
    /// Further candidates in order; never empty
    pub fallbacks: Vec<String>,
    /// Single-byte font that can always encode sanitized text
    pub encoding_safe_fallback: String,
    /// Whether `primary` can show the detected script as-is
    pub preserves_script: bool,
    /// Script the recommendation was made for
    pub script: Script,
    /// Present when the sample mixes scripts
    pub multi_script: Option<MultiScriptAdvice>,
}

impl FontRecommendation {
    /// Primary followed by the fallbacks.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.fallbacks.iter().map(String::as_str))
    }

    /// Whether a multi-script font should be preferred.
    pub fn prefers_multi_script(&self) -> bool {
        self.multi_script.is_some()
    }
}

/// Resolves detection results against a font catalog.
#[derive(Debug, Clone)]
pub struct FontResolver {
    catalog: FontCatalog,
    minority_share: f32,
}

impl FontResolver {
    /// Create a resolver over `catalog`.
    pub fn new(catalog: FontCatalog) -> Self {
        Self {
            catalog,
            minority_share: DEFAULT_MINORITY_SHARE,
        }
    }

    /// Set the minority script share for multi-script advice.
    ///
    /// Fails unless `share` lies in `[0, 1]`.
    pub fn with_minority_share(mut self, share: f32) -> Result<Self> {
        check_unit("minority_script_share", share)?;
        self.minority_share = share;
        Ok(self)
    }

    /// Catalog in use.
    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Recommend fonts for a detection result.
    ///
    /// Latin text is pointed at single-byte fonts and never marked as
    /// preserving its script. For other scripts the best usable supporting
    /// font wins, then a poor one; with no support at all the recommendation
    /// falls back to the encoding-safe font and the text has to be
    /// transliterated.
    pub fn resolve(&self, detection: &LanguageDetectionResult) -> FontRecommendation {
        self.resolve_script(detection.script, &detection.analysis)
    }

    /// Recommend fonts for `script`, whatever language detection settled on.
    ///
    /// Mixed samples whose detected language is Latin can still carry a
    /// non-Latin script worth preserving; this resolves against that script
    /// with the sample's analysis feeding the multi-script advice.
    pub fn resolve_script(&self, script: Script, analysis: &TextAnalysis) -> FontRecommendation {
        let safe = self.catalog.encoding_safe();
        let supporting = self.catalog.supporting(script);

        let (primary, preserves_script): (&FontCapability, bool) = if script.is_latin() {
            (safe, false)
        } else if let Some(best) = supporting.iter().find(|f| f.is_usable()) {
            (*best, true)
        } else if let Some(poor) = supporting.first() {
            log::warn!("Only poor-quality fonts support {}; using {}", script, poor.font_id);
            (*poor, true)
        } else {
            log::info!("No font supports {}; text will be transliterated", script);
            (safe, false)
        };

        let mut fallbacks: IndexSet<&str> = IndexSet::new();
        if script.is_latin() {
            for font in self.catalog.ranked(|f| f.is_single_byte() && f.is_usable()) {
                fallbacks.insert(&font.font_id);
            }
        }
        for font in &supporting {
            fallbacks.insert(&font.font_id);
        }
        for font in self.catalog.ranked(|f| f.is_single_byte()) {
            fallbacks.insert(&font.font_id);
        }
        fallbacks.shift_remove(primary.font_id.as_str());
        if fallbacks.is_empty() {
            fallbacks.insert(&safe.font_id);
        }

        let multi_script = self.multi_script_advice(analysis);

        log::debug!(
            "Resolved {} to {} (preserves script: {}, {} fallback(s))",
            script,
            primary.font_id,
            preserves_script,
            fallbacks.len()
        );

        FontRecommendation {
            primary: primary.font_id.clone(),
            fallbacks: fallbacks.into_iter().map(str::to_string).collect(),
            encoding_safe_fallback: safe.font_id.clone(),
            preserves_script,
            script,
            multi_script,
        }
    }

    fn multi_script_advice(&self, analysis: &TextAnalysis) -> Option<MultiScriptAdvice> {
        let minority = analysis.minority_scripts(self.minority_share);
        if minority.is_empty() {
            return None;
        }

        let scripts: Vec<Script> = analysis.script_counts.keys().copied().collect();
        let fonts = self
            .catalog
            .ranked(|f| f.supports_all(&scripts))
            .into_iter()
            .map(|f| f.font_id.clone())
            .collect();

        Some(MultiScriptAdvice {
            scripts,
            minority: minority
                .into_iter()
                .map(|(script, share)| ScriptShare { script, share })
                .collect(),
            fonts,
        })
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(FontCatalog::builtin())
    }
}

/// Recommend fonts from the built-in catalog.
pub fn recommend_fonts(detection: &LanguageDetectionResult) -> FontRecommendation {
    FontResolver::default().resolve(detection)
}
