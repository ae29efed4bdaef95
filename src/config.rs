//! Configuration for the speech controller

use std::path::Path;

use serde::Deserialize;

use crate::Result;
use crate::rate::RatePolicy;

/// Speech output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Language tag passed to the synthesis engine (e.g. `en-US`)
    pub language: String,

    /// Adaptive playback-rate policy
    pub rate: RatePolicy,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            rate: RatePolicy::default(),
        }
    }
}

impl SpeechConfig {
    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
