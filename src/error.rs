//! Error types for the font resolution library.
//!
//! Text analysis, detection and sanitization never fail: they report quality
//! loss through warnings and counts. The types here cover the two remaining
//! cases, misconfiguration of the injected data (catalogs, thresholds) and
//! renderer-side font activation failures.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors.
///
/// These indicate a programming or deployment mistake (an empty font catalog,
/// a threshold outside `[0, 1]`), never a problem with user-supplied text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Font catalog has no entries
    #[error("Font catalog is empty")]
    EmptyCatalog,

    /// Font catalog has no single-byte font usable as a terminal fallback
    #[error("Font catalog has no single-byte font rated better than poor")]
    NoEncodingSafeFont,

    /// Duplicate font identifier in a catalog
    #[error("Duplicate font id in catalog: {0}")]
    DuplicateFont(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by a renderer when a font cannot be made active.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Font is neither built in nor registered with the renderer
    #[error("Font not available: {0}")]
    FontNotAvailable(String),

    /// Font data could not be parsed
    #[error("Invalid font data for {font}: {reason}")]
    InvalidFontData {
        /// Font identifier
        font: String,
        /// Parser message
        reason: String,
    },

    /// Embedding was attempted but the backend rejected it
    #[error("Failed to embed font {font}: {reason}")]
    EmbeddingFailed {
        /// Font identifier
        font: String,
        /// Backend message
        reason: String,
    },

    /// Any other backend failure
    #[error("Renderer error: {0}")]
    Backend(String),
}
