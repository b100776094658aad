//! Settings file loading.
//!
//! An optional TOML file supplies defaults for the CLI; flags given on the
//! command line override it.

use super::config::DEFAULT_INLINE_DIFF_THRESHOLD;
use super::error::SettingsError;
use crate::engine::{DiffAlgorithm, IgnorePatterns, Platform};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Complete settings file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Platform name, e.g. `"CISCO_IOS"`
    pub platform: Option<String>,

    /// VLAN trunk normalization before comparing
    pub normalize: Option<bool>,

    #[serde(default)]
    pub algorithm: DiffAlgorithm,

    /// Per-comparison timeout
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub ignore: IgnoreSettings,

    #[serde(default)]
    pub inline: InlineSettings,
}

/// `[ignore]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct IgnoreSettings {
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// `[inline]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InlineSettings {
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

impl Default for InlineSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_INLINE_DIFF_THRESHOLD,
        }
    }
}

fn default_threshold() -> f32 {
    DEFAULT_INLINE_DIFF_THRESHOLD
}

impl Settings {
    /// Parse settings from TOML text and validate them
    pub fn from_toml(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if let Some(name) = &self.platform {
            name.parse::<Platform>().map_err(SettingsError::Invalid)?;
        }
        if !(0.0..=1.0).contains(&self.inline.threshold) {
            return Err(SettingsError::Invalid(format!(
                "inline.threshold must be within 0.0..=1.0, got {}",
                self.inline.threshold
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(SettingsError::Invalid("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Configured platform, if any
    pub fn platform(&self) -> Result<Option<Platform>, SettingsError> {
        self.platform
            .as_deref()
            .map(|name| name.parse::<Platform>().map_err(SettingsError::Invalid))
            .transpose()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Compile file patterns followed by `extra` (e.g. from the CLI)
    ///
    /// # Errors
    /// * `SettingsError::Ignore` - empty, duplicate, or invalid pattern
    pub fn ignore_patterns(&self, extra: &[String]) -> Result<IgnorePatterns, SettingsError> {
        let patterns = IgnorePatterns::from_patterns(self.ignore.patterns.iter().chain(extra))?;
        Ok(patterns)
    }
}

/// Load settings from a TOML file
///
/// # Arguments
/// * `path` - Path to the TOML settings file
///
/// # Errors
/// * `SettingsError::ReadFailed` - If file cannot be read
/// * `SettingsError::ParseFailed` - If TOML is invalid
/// * `SettingsError::Invalid` - If a value is out of range
///
/// # Example
/// ```ignore
/// let settings = load_settings("config-lens.toml")?;
/// ```
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let contents = fs::read_to_string(path)?;
    Settings::from_toml(&contents)
}
