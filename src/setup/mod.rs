//! Renderer font setup.
//!
//! Ties detection, resolution and sanitization into one call that always
//! leaves the renderer with an active font and the samples in a form that
//! font can show.
//!
//! ```ignore
//! use glyph_oxide::setup::{FontSetup, SetupOptions};
//! use glyph_oxide::writer::DocumentFontContext;
//!
//! let mut context = DocumentFontContext::new();
//! let result = FontSetup::new().setup_font(&mut context, &["Привет, мир!"], &SetupOptions::default());
//! assert!(result.success);
//! ```

mod fallback;
mod font_setup;
mod state;

pub use fallback::{ChainRun, FallbackChain, FallbackStep, StepFailure, StepRole};
pub use font_setup::{setup_font, FontSetup, FontSetupResult, SetupOptions};
pub use state::{SetupOutcome, SetupState};
