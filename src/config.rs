//! Tuning parameters for detection and font setup.
//!
//! The scoring bonuses and thresholds are policy, not derived constants, so
//! they live here as configuration with the shipped values as defaults.
//! Both structs deserialize from JSON with every field optional.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Language detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Maximum number of characters analyzed per sample.
    pub max_sample_chars: usize,

    /// Maximum number of tabular cells collected by a `SampleBuilder`.
    pub max_sample_cells: usize,

    /// Bonus added when a language's diagnostic characters are present.
    pub diacritic_bonus: f32,

    /// Bonus added to every language of a non-Latin script that is present.
    pub script_presence_bonus: f32,

    /// Results below this confidence carry a low-confidence warning.
    pub confidence_threshold: f32,

    /// Confidence reported for pure-ASCII input.
    pub ascii_confidence: f32,

    /// Confidence reported when no language matched at all.
    pub unknown_confidence: f32,

    /// Share of letters above which a secondary script counts as mixed in.
    pub minority_script_share: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            max_sample_chars: 5000,
            max_sample_cells: 200,
            diacritic_bonus: 0.3,
            script_presence_bonus: 0.2,
            confidence_threshold: 0.7,
            ascii_confidence: 0.8,
            unknown_confidence: 0.1,
            minority_script_share: 0.1,
        }
    }

    /// Set the sample size cap.
    pub fn with_max_sample_chars(mut self, chars: usize) -> Self {
        self.max_sample_chars = chars;
        self
    }

    /// Set the cell cap used when assembling samples from tables.
    pub fn with_max_sample_cells(mut self, cells: usize) -> Self {
        self.max_sample_cells = cells;
        self
    }

    /// Set the low-confidence warning threshold.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the diagnostic-character bonus.
    pub fn with_diacritic_bonus(mut self, bonus: f32) -> Self {
        self.diacritic_bonus = bonus;
        self
    }

    /// Set the script-presence bonus.
    pub fn with_script_presence_bonus(mut self, bonus: f32) -> Self {
        self.script_presence_bonus = bonus;
        self
    }

    /// Set the minority-script share.
    pub fn with_minority_script_share(mut self, share: f32) -> Self {
        self.minority_script_share = share;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_sample_chars == 0 {
            return Err(Error::InvalidConfig("max_sample_chars must be positive".to_string()));
        }
        if self.max_sample_cells == 0 {
            return Err(Error::InvalidConfig("max_sample_cells must be positive".to_string()));
        }
        check_unit("confidence_threshold", self.confidence_threshold)?;
        check_unit("minority_script_share", self.minority_script_share)?;
        check_positive_unit("ascii_confidence", self.ascii_confidence)?;
        check_positive_unit("unknown_confidence", self.unknown_confidence)?;
        check_bonus("diacritic_bonus", self.diacritic_bonus)?;
        check_bonus("script_presence_bonus", self.script_presence_bonus)?;
        Ok(())
    }

    /// Parse and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Font setup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Non-Latin share of letters above which script preservation is attempted.
    pub preserve_threshold: f32,

    /// Default font of the reliable chain.
    pub base_font: String,

    /// Final entry of every fallback chain.
    pub last_resort_font: String,

    /// Detection parameters.
    pub detection: DetectionConfig,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            preserve_threshold: 0.2,
            base_font: "Helvetica".to_string(),
            last_resort_font: "Courier".to_string(),
            detection: DetectionConfig::new(),
        }
    }

    /// Set the preservation threshold.
    pub fn with_preserve_threshold(mut self, threshold: f32) -> Self {
        self.preserve_threshold = threshold;
        self
    }

    /// Set the base default font.
    pub fn with_base_font(mut self, font: impl Into<String>) -> Self {
        self.base_font = font.into();
        self
    }

    /// Set the last-resort font.
    pub fn with_last_resort_font(mut self, font: impl Into<String>) -> Self {
        self.last_resort_font = font.into();
        self
    }

    /// Set detection parameters.
    pub fn with_detection(mut self, detection: DetectionConfig) -> Self {
        self.detection = detection;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        check_unit("preserve_threshold", self.preserve_threshold)?;
        if self.base_font.trim().is_empty() {
            return Err(Error::InvalidConfig("base_font must not be empty".to_string()));
        }
        if self.last_resort_font.trim().is_empty() {
            return Err(Error::InvalidConfig("last_resort_font must not be empty".to_string()));
        }
        self.detection.validate()
    }

    /// Parse and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn check_unit(name: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidConfig(format!("{} = {} is outside [0, 1]", name, value)));
    }
    Ok(())
}

fn check_positive_unit(name: &str, value: f32) -> Result<()> {
    check_unit(name, value)?;
    if value == 0.0 {
        return Err(Error::InvalidConfig(format!("{} must be greater than zero", name)));
    }
    Ok(())
}

fn check_bonus(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidConfig(format!("{} = {} must be a non-negative number", name, value)));
    }
    Ok(())
}
