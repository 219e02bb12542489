//! Materialization policy and load state

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::TemplateError;

/// How a template produces the node it inserts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateMode {
    /// Detach and claim the original node once, then behave as `Reuse`
    #[default]
    Move,
    /// Produce a fresh deep copy on every materialization
    Clone,
    /// Always hand out the original node untouched
    #[serde(alias = "none")]
    Reuse,
}

impl TemplateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateMode::Move => "move",
            TemplateMode::Clone => "clone",
            TemplateMode::Reuse => "reuse",
        }
    }
}

impl fmt::Display for TemplateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateMode {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(TemplateMode::Move),
            "clone" => Ok(TemplateMode::Clone),
            "reuse" | "none" => Ok(TemplateMode::Reuse),
            other => Err(TemplateError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Appearance state; only ever advances from `NotLoaded` to `Loaded`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded,
}
