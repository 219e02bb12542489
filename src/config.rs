//! Runtime configuration loaded from TOML
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [errors]
//! report_url = "https://github.com/Axtell/Axtell/issues"
//! dump_hint = "viewcore --dump text"
//!
//! [session]
//! data_id = "local"
//!
//! [templates]
//! marker_class = "template"
//! default_mode = "move"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::template::{TemplateMode, TEMPLATE_MARKER};

/// Errors that can occur when loading or parsing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub errors: ErrorsConfig,
    pub session: SessionConfig,
    pub templates: TemplatesConfig,
}

/// Text shown after every reported error
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ErrorsConfig {
    /// Where users should file reports
    pub report_url: String,
    /// How to retrieve a dump of the error log
    pub dump_hint: String,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            report_url: "https://github.com/Axtell/Axtell/issues".to_string(),
            dump_hint: "ErrorManager::dump_text()".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Identifier embedded in dump headers
    pub data_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_id: "local".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Class marking template nodes in markup
    pub marker_class: String,
    /// Mode for marked nodes without a `data-template` attribute
    pub default_mode: TemplateMode,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            marker_class: TEMPLATE_MARKER.to_string(),
            default_mode: TemplateMode::Move,
        }
    }
}

impl RuntimeConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the session identifier shown in dumps
    pub fn with_data_id(mut self, data_id: impl Into<String>) -> Self {
        self.session.data_id = data_id.into();
        self
    }

    /// Set the issue tracker URL printed after reported errors
    pub fn with_report_url(mut self, url: impl Into<String>) -> Self {
        self.errors.report_url = url.into();
        self
    }

    /// Set the fallback mode for marked templates
    pub fn with_default_mode(mut self, mode: TemplateMode) -> Self {
        self.templates.default_mode = mode;
        self
    }
}
