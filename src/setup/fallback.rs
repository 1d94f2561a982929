//! Font fallback chains.
//!
//! A chain is an ordered list of fonts to try. [`FallbackChain::run`] walks
//! it once and stops at the first font the renderer accepts; every rejection
//! is kept for reporting.

use serde::Serialize;

use crate::error::RenderError;
use crate::text::classifier::Script;
use crate::writer::FontTarget;

/// Why a font is in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "script")]
pub enum StepRole {
    /// Font explicitly requested by the caller
    Override,
    /// Embedded font for a preserved script
    Embedded(Script),
    /// Best single-byte font from the catalog
    EncodingSafe,
    /// Configured default font
    BaseDefault,
    /// Configured last resort
    LastResort,
}

impl std::fmt::Display for StepRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepRole::Override => f.write_str("requested font"),
            StepRole::Embedded(script) => write!(f, "embedded {} font", script),
            StepRole::EncodingSafe => f.write_str("encoding-safe font"),
            StepRole::BaseDefault => f.write_str("default font"),
            StepRole::LastResort => f.write_str("last-resort font"),
        }
    }
}

/// One candidate font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackStep {
    /// Font identifier
    pub font_id: String,
    /// Role in the chain
    pub role: StepRole,
}

/// A font the renderer refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// The refused step
    pub step: FallbackStep,
    /// Renderer error
    pub error: RenderError,
}

/// Result of walking a chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainRun {
    /// Index of the activated step
    pub selected: Option<usize>,
    /// Rejections in order
    pub failures: Vec<StepFailure>,
}

impl ChainRun {
    /// Whether no step was activated.
    pub fn is_exhausted(&self) -> bool {
        self.selected.is_none()
    }
}

/// Ordered, de-duplicated list of fonts to try.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FallbackChain {
    steps: Vec<FallbackStep>,
}

impl FallbackChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a font unless it is already in the chain.
    pub fn push(&mut self, font_id: &str, role: StepRole) -> &mut Self {
        let font_id = font_id.trim();
        if !font_id.is_empty() && !self.contains(font_id) {
            self.steps.push(FallbackStep {
                font_id: font_id.to_string(),
                role,
            });
        }
        self
    }

    /// Whether `font_id` is already in the chain.
    pub fn contains(&self, font_id: &str) -> bool {
        self.steps.iter().any(|s| s.font_id == font_id)
    }

    /// Steps in order.
    pub fn steps(&self) -> &[FallbackStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Try each font in order until the renderer accepts one.
    pub fn run<R>(&self, renderer: &mut R) -> ChainRun
    where
        R: FontTarget + ?Sized,
    {
        let mut run = ChainRun::default();
        for (index, step) in self.steps.iter().enumerate() {
            match renderer.set_active_font(&step.font_id) {
                Ok(()) => {
                    log::debug!("Activated {} {}", step.role, step.font_id);
                    run.selected = Some(index);
                    return run;
                },
                Err(e) => {
                    log::warn!("Could not activate {} {}: {}", step.role, step.font_id, e);
                    run.failures.push(StepFailure {
                        step: step.clone(),
                        error: e,
                    });
                },
            }
        }
        run
    }
}
