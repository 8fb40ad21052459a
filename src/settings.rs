//! # Settings Module
//!
//! ## Purpose
//! Options of the reaction order analysis that the user may want to change without
//! recompiling: forced delimiter, header handling, number of decimals in the fitted
//! equations, optional check of time monotonicity and the logging level of the binary.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "delimiter": null,
//!   "header": "Auto",
//!   "precision": 4,
//!   "require_monotonic_time": false,
//!   "log_level": "info"
//! }
//! ```
//!
//! ## Usage Pattern
//! ```rust
//! use KiOrder::settings::{AnalysisSettings, SettingsManager};
//!
//! let manager = SettingsManager::with_config_file("no_such_settings.json");
//! assert_eq!(manager.get_settings(), &AnalysisSettings::default());
//! ```

use crate::ReactionOrder::order_errors::KineticsError;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// default name of the settings file searched in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "kiorder_settings.json";

/// How the first non-blank row of the data file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HeaderPolicy {
    /// the first row is a header if any of its first two cells is not a number
    #[default]
    Auto,
    /// the first row is always a header
    Present,
    /// all rows are data
    Absent,
}

/// Options of a single analysis run.
///
/// # Fields
/// * `delimiter` - forced field separator; `None` means auto-detection (comma, semicolon, tab, whitespace)
/// * `header` - treatment of the first row
/// * `precision` - decimals of slope and intercept in equation strings
/// * `require_monotonic_time` - if true, a time value smaller than the previous one is a domain error
/// * `log_level` - level of the terminal logger of the binary ("error", "warn", "info", "debug", "trace", "off")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub delimiter: Option<char>,
    pub header: HeaderPolicy,
    pub precision: usize,
    pub require_monotonic_time: bool,
    pub log_level: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            delimiter: None,
            header: HeaderPolicy::Auto,
            precision: 4,
            require_monotonic_time: false,
            log_level: "info".to_string(),
        }
    }
}

impl AnalysisSettings {
    /// Level filter for simplelog; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.parse::<LevelFilter>() {
            Ok(level) => level,
            Err(_) => {
                warn!("unknown log level '{}', using 'info'", self.log_level);
                LevelFilter::Info
            }
        }
    }
}

/// Loads, keeps and saves [`AnalysisSettings`].
///
/// # Fields
/// * `settings` - current settings
/// * `config_file` - path of the JSON file used for persistence
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings: AnalysisSettings,
    config_file: String,
}

impl SettingsManager {
    /// Creates manager with the default settings file in the current directory.
    /// A malformed file is reported and replaced by defaults.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_SETTINGS_FILE)
    }

    /// Creates manager reading the given settings file.
    pub fn with_config_file(config_file: &str) -> Self {
        let settings = match Self::load_config(config_file) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{}; default settings are used", e);
                AnalysisSettings::default()
            }
        };
        Self {
            settings,
            config_file: config_file.to_string(),
        }
    }

    /// Reads settings from a JSON file.
    ///
    /// # Returns
    /// * `Ok(AnalysisSettings)` - settings from file or defaults if file does not exist
    /// * `Err(KineticsError)` - if the file cannot be read or is not valid JSON
    pub fn load_config(config_file: &str) -> Result<AnalysisSettings, KineticsError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let settings: AnalysisSettings = serde_json::from_str(&content)?;
            info!("settings loaded from '{}'", config_file);
            Ok(settings)
        } else {
            Ok(AnalysisSettings::default())
        }
    }

    /// Writes current settings as pretty JSON. Does nothing in tests.
    pub fn save_config(&self) -> Result<(), KineticsError> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            let content = serde_json::to_string_pretty(&self.settings)?;
            fs::write(&self.config_file, content)?;
            Ok(())
        }
    }

    pub fn get_settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Replaces the settings and saves them.
    pub fn set_settings(&mut self, settings: AnalysisSettings) -> Result<(), KineticsError> {
        self.settings = settings;
        self.save_config()
    }

    /// Restores defaults and saves them.
    pub fn reset_to_defaults(&mut self) -> Result<(), KineticsError> {
        self.set_settings(AnalysisSettings::default())
    }

    /// Settings as a pretty JSON string for display
    pub fn to_json(&self) -> Result<String, KineticsError> {
        Ok(serde_json::to_string_pretty(&self.settings)?)
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}
