//! Setup state machine states.

use serde::Serialize;

/// How a setup run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupOutcome {
    /// The planned font was activated
    Success,
    /// A fallback font was activated, or the chain ran out
    Fallback,
}

/// State of a setup run.
///
/// `Idle → AnalyzingText → DecidingMode → ConfiguringFont → Done`.
/// Reliable mode skips `AnalyzingText`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case", tag = "state", content = "outcome")]
pub enum SetupState {
    /// Not started
    Idle,
    /// Detecting the language of the samples
    AnalyzingText,
    /// Choosing between script preservation and transliteration
    DecidingMode,
    /// Activating fonts on the renderer
    ConfiguringFont,
    /// Finished
    Done(SetupOutcome),
}

impl SetupState {
    /// Whether the run has finished.
    pub fn is_done(&self) -> bool {
        matches!(self, SetupState::Done(_))
    }

    /// Whether `next` may follow this state.
    pub fn can_transition_to(&self, next: SetupState) -> bool {
        use SetupState::*;
        matches!(
            (self, next),
            (Idle, AnalyzingText)
                | (Idle, DecidingMode)
                | (AnalyzingText, DecidingMode)
                | (DecidingMode, ConfiguringFont)
                | (ConfiguringFont, Done(_))
        )
    }

    /// Move to `next`, logging the transition.
    pub(crate) fn advance(&mut self, next: SetupState) {
        debug_assert!(
            self.can_transition_to(next),
            "invalid setup transition {:?} -> {:?}",
            self,
            next
        );
        log::trace!("Font setup: {:?} -> {:?}", self, next);
        *self = next;
    }
}

impl Default for SetupState {
    fn default() -> Self {
        SetupState::Idle
    }
}
