//! Font setup orchestration.
//!
//! [`FontSetup::setup_font`] prepares a renderer for a set of text samples:
//! it detects the language, decides between preserving the script with an
//! embedded font and transliterating to single-byte text, activates a font
//! through a fallback chain and returns the cleaned samples.
//!
//! Every call succeeds. Quality loss and failed activations are reported
//! through `warnings`.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::fallback::{ChainRun, FallbackChain, StepRole};
use super::state::{SetupOutcome, SetupState};
use crate::config::SetupConfig;
use crate::error::Result;
use crate::fonts::catalog::FontCatalog;
use crate::fonts::resolver::{FontRecommendation, FontResolver};
use crate::text::analyzer::TextAnalyzer;
use crate::text::cache::DetectionCache;
use crate::text::classifier::Script;
use crate::text::detector::{LanguageDetectionResult, LanguageDetector, SampleBuilder};
use crate::text::replacements::ReplacementTable;
use crate::text::sanitizer::TextSanitizer;
use crate::writer::FontTarget;

/// Per-call options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupOptions {
    /// Skip detection and use the fixed single-byte chain
    pub use_reliable_mode: bool,
    /// Font to try first
    pub font_override: Option<String>,
    /// Whether embedded fonts may be tried for non-Latin scripts
    pub allow_embedding: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            use_reliable_mode: false,
            font_override: None,
            allow_embedding: true,
        }
    }
}

impl SetupOptions {
    /// Options for reliable mode.
    pub fn reliable() -> Self {
        Self {
            use_reliable_mode: true,
            ..Self::default()
        }
    }

    /// Try `font` first.
    pub fn with_font_override(mut self, font: impl Into<String>) -> Self {
        self.font_override = Some(font.into());
        self
    }

    /// Allow or forbid embedded fonts.
    pub fn with_embedding(mut self, allow: bool) -> Self {
        self.allow_embedding = allow;
        self
    }
}

/// Outcome of a setup run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSetupResult {
    /// Always `true`
    pub success: bool,
    /// Font left active on the renderer
    pub selected_font: String,
    /// Diagnostics, in the order they arose
    pub warnings: Vec<String>,
    /// Distinct code points altered or removed across all samples
    pub transliteration_count: usize,
    /// Whether a non-Latin script is shown as-is
    pub preserves_non_latin_script: bool,
    /// Samples sanitized for the selected font
    pub cleaned_samples: Vec<String>,
    /// Detection result (absent in reliable mode)
    pub detection: Option<LanguageDetectionResult>,
    /// Final state
    pub final_state: SetupState,
    /// Whether every font in the chain was refused
    pub fallback_exhausted: bool,
}

impl FontSetupResult {
    /// Whether the run ended on a fallback.
    pub fn used_fallback(&self) -> bool {
        self.final_state == SetupState::Done(SetupOutcome::Fallback)
    }
}

/// Font setup orchestrator.
#[derive(Debug, Clone)]
pub struct FontSetup {
    detector: LanguageDetector,
    resolver: FontResolver,
    sanitizer: TextSanitizer,
    config: SetupConfig,
    cache: Option<Arc<dyn DetectionCache>>,
}

impl Default for FontSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSetup {
    /// Create an orchestrator with default configuration and the built-in
    /// catalog.
    pub fn new() -> Self {
        Self {
            detector: LanguageDetector::new(),
            resolver: FontResolver::default(),
            sanitizer: TextSanitizer::new(),
            config: SetupConfig::default(),
            cache: None,
        }
    }

    /// Create an orchestrator with custom configuration and catalog.
    pub fn with_config(config: SetupConfig, catalog: FontCatalog) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector: LanguageDetector::with_config(config.detection.clone())?,
            resolver: FontResolver::new(catalog)
                .with_minority_share(config.detection.minority_script_share)?,
            sanitizer: TextSanitizer::new(),
            config,
            cache: None,
        })
    }

    /// Cache detection results in `cache`.
    pub fn with_cache(mut self, cache: Arc<dyn DetectionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Use a custom replacement table for analysis and sanitization.
    pub fn with_replacements(mut self, replacements: ReplacementTable) -> Self {
        self.detector = self
            .detector
            .with_analyzer(TextAnalyzer::with_replacements(replacements.clone()));
        self.sanitizer = TextSanitizer::with_replacements(replacements);
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &SetupConfig {
        &self.config
    }

    /// Resolver in use.
    pub fn resolver(&self) -> &FontResolver {
        &self.resolver
    }

    /// Detection cache, if any.
    pub fn cache(&self) -> Option<&Arc<dyn DetectionCache>> {
        self.cache.as_ref()
    }

    /// Prepare `renderer` for `samples`.
    pub fn setup_font<R, S>(
        &self,
        renderer: &mut R,
        samples: &[S],
        options: &SetupOptions,
    ) -> FontSetupResult
    where
        R: FontTarget + ?Sized,
        S: AsRef<str>,
    {
        let mut state = SetupState::Idle;
        let font_override = options.font_override.as_deref();

        if options.use_reliable_mode {
            log::info!("Font setup in reliable mode");
            state.advance(SetupState::DecidingMode);
            let chain = self.reliable_chain(font_override);
            state.advance(SetupState::ConfiguringFont);
            let run = chain.run(renderer);
            return self.finish(state, &chain, run, samples, None, None, Vec::new(), false);
        }

        state.advance(SetupState::AnalyzingText);
        let detection = self.detect(samples);
        let mut warnings = detection.warnings.clone();

        state.advance(SetupState::DecidingMode);
        let recommendation = self.resolver.resolve(&detection);
        if let Some(advice) = &recommendation.multi_script {
            if let Some(font) = advice.fonts.first() {
                warnings.push(format!(
                    "Text mixes scripts; a multi-script font such as {} is preferable",
                    font
                ));
            }
        }
        let preserve = self.preservation_target(&detection, options, &mut warnings);

        state.advance(SetupState::ConfiguringFont);
        let Some((script, script_recommendation)) = preserve else {
            let chain = self.transliteration_chain(&recommendation, font_override);
            let run = chain.run(renderer);
            return self.finish(state, &chain, run, samples, None, Some(detection), warnings, false);
        };

        let chain = self.embedded_chain(script, &script_recommendation, font_override);
        let run = chain.run(renderer);
        if !run.is_exhausted() {
            return self.finish(
                state,
                &chain,
                run,
                samples,
                Some(script),
                Some(detection),
                warnings,
                false,
            );
        }

        log::warn!("No embedded font for {} could be activated; degrading to reliable mode", script);
        push_failures(&mut warnings, &run);
        warnings.push(format!(
            "Could not activate an embedded {} font; text will be transliterated",
            script
        ));
        let chain = self.reliable_chain(font_override);
        let run = chain.run(renderer);
        self.finish(state, &chain, run, samples, None, Some(detection), warnings, true)
    }

    fn detect<S: AsRef<str>>(&self, samples: &[S]) -> LanguageDetectionResult {
        let mut builder = SampleBuilder::from_config(self.detector.config());
        builder.extend_cells(samples.iter().map(|s| s.as_ref()));
        let sample = builder.build();
        match &self.cache {
            Some(cache) => self.detector.detect_cached(&sample, cache.as_ref()).as_ref().clone(),
            None => self.detector.detect(&sample),
        }
    }

    /// Script to preserve and the recommendation for it, if preservation
    /// should be attempted.
    ///
    /// The target is the dominant non-Latin script, so a Latin-led sample
    /// with enough Cyrillic still keeps its Cyrillic.
    fn preservation_target(
        &self,
        detection: &LanguageDetectionResult,
        options: &SetupOptions,
        warnings: &mut Vec<String>,
    ) -> Option<(Script, FontRecommendation)> {
        let share = detection.analysis.non_latin_share();
        if share <= self.config.preserve_threshold {
            log::debug!(
                "Non-Latin share {:.2} does not exceed {:.2}; transliterating",
                share,
                self.config.preserve_threshold
            );
            return None;
        }

        let script = detection.analysis.dominant_non_latin_script()?;
        let recommendation = self.resolver.resolve_script(script, &detection.analysis);
        if !recommendation.preserves_script {
            warnings.push(format!(
                "No font in the catalog supports {}; text will be transliterated",
                script
            ));
            return None;
        }
        if !options.allow_embedding {
            warnings.push(format!("Embedding is disabled; {} text will be transliterated", script));
            return None;
        }
        Some((script, recommendation))
    }

    fn reliable_chain(&self, font_override: Option<&str>) -> FallbackChain {
        let mut chain = FallbackChain::new();
        if let Some(font) = font_override {
            chain.push(font, StepRole::Override);
        }
        chain
            .push(&self.config.base_font, StepRole::BaseDefault)
            .push(&self.config.last_resort_font, StepRole::LastResort);
        chain
    }

    fn transliteration_chain(
        &self,
        recommendation: &FontRecommendation,
        font_override: Option<&str>,
    ) -> FallbackChain {
        let mut chain = FallbackChain::new();
        if let Some(font) = font_override {
            chain.push(font, StepRole::Override);
        }
        chain
            .push(&recommendation.encoding_safe_fallback, StepRole::EncodingSafe)
            .push(&self.config.base_font, StepRole::BaseDefault)
            .push(&self.config.last_resort_font, StepRole::LastResort);
        chain
    }

    fn embedded_chain(
        &self,
        script: Script,
        recommendation: &FontRecommendation,
        font_override: Option<&str>,
    ) -> FallbackChain {
        let catalog = self.resolver.catalog();
        let shows_script = |font: &str| {
            catalog
                .get(font)
                .map(|f| f.supports(script) && !f.is_single_byte())
                .unwrap_or(false)
        };

        let mut chain = FallbackChain::new();
        if let Some(font) = font_override.filter(|f| shows_script(f)) {
            chain.push(font, StepRole::Override);
        }
        for font in recommendation.candidates().filter(|f| shows_script(f)) {
            chain.push(font, StepRole::Embedded(script));
        }
        chain
    }

    #[allow(clippy::too_many_arguments)]
    fn finish<S: AsRef<str>>(
        &self,
        mut state: SetupState,
        chain: &FallbackChain,
        run: ChainRun,
        samples: &[S],
        preserve: Option<Script>,
        detection: Option<LanguageDetectionResult>,
        mut warnings: Vec<String>,
        degraded: bool,
    ) -> FontSetupResult {
        push_failures(&mut warnings, &run);

        let (selected_font, fallback_exhausted) = match run.selected {
            Some(index) => (chain.steps()[index].font_id.clone(), false),
            None => {
                log::error!(
                    "Font fallback chain exhausted after {} step(s); selecting {}",
                    chain.len(),
                    self.config.last_resort_font
                );
                warnings.push(format!(
                    "Every fallback font was refused; {} was selected without confirmation",
                    self.config.last_resort_font
                ));
                (self.config.last_resort_font.clone(), true)
            },
        };

        let mut changed = BTreeSet::new();
        let cleaned_samples: Vec<String> = samples
            .iter()
            .map(|sample| {
                let result = self.sanitizer.sanitize(sample.as_ref(), preserve);
                changed.extend(result.changed);
                result.cleaned_text
            })
            .collect();
        if !changed.is_empty() {
            warnings.push(format!(
                "{} distinct character(s) were transliterated or removed",
                changed.len()
            ));
        }

        let outcome = if degraded || run.selected != Some(0) {
            SetupOutcome::Fallback
        } else {
            SetupOutcome::Success
        };
        state.advance(SetupState::Done(outcome));

        log::info!(
            "Font setup done: {} ({:?}, preserves script: {}, {} change(s))",
            selected_font,
            outcome,
            preserve.is_some(),
            changed.len()
        );

        FontSetupResult {
            success: true,
            selected_font,
            warnings,
            transliteration_count: changed.len(),
            preserves_non_latin_script: preserve.is_some(),
            cleaned_samples,
            detection,
            final_state: state,
            fallback_exhausted,
        }
    }
}

fn push_failures(warnings: &mut Vec<String>, run: &ChainRun) {
    for failure in &run.failures {
        warnings.push(format!(
            "Font {} ({}) could not be activated: {}",
            failure.step.font_id, failure.step.role, failure.error
        ));
    }
}

/// Set up `renderer` with the default orchestrator.
pub fn setup_font<R, S>(renderer: &mut R, samples: &[S], options: &SetupOptions) -> FontSetupResult
where
    R: FontTarget + ?Sized,
    S: AsRef<str>,
{
    FontSetup::new().setup_font(renderer, samples, options)
}
