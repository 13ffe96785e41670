//! Intent and action enumerations
//!
//! Both are parsed from untrusted model output, so parsing is lenient about
//! case and whitespace but never invents a value outside the enumeration.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The classified purpose of a customer request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Replace,
    Cancel,
    #[default]
    Unknown,
}

impl Intent {
    /// Parse a model-provided intent label, `None` if it is not one of ours
    pub fn parse(label: &str) -> Option<Self> {
        debug!(%label, "Intent::parse: called");
        match label.trim().to_lowercase().as_str() {
            "replace" => Some(Self::Replace),
            "cancel" => Some(Self::Cancel),
            "unknown" => Some(Self::Unknown),
            _ => {
                debug!(%label, "Intent::parse: unrecognized label");
                None
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Cancel => "cancel",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The next step the planner asks the workflow to take
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Validate,
    Replace,
    Cancel,
    #[default]
    Finish,
}

impl Action {
    /// All actions, in the order they are offered to the planner
    pub const ALL: [Action; 4] = [Action::Validate, Action::Replace, Action::Cancel, Action::Finish];

    /// Parse a model-provided action label, `None` if it is not one of ours
    pub fn parse(label: &str) -> Option<Self> {
        debug!(%label, "Action::parse: called");
        match label.trim().to_lowercase().as_str() {
            "validate" => Some(Self::Validate),
            "replace" => Some(Self::Replace),
            "cancel" => Some(Self::Cancel),
            "finish" => Some(Self::Finish),
            _ => {
                debug!(%label, "Action::parse: unrecognized label");
                None
            }
        }
    }

    /// Replace and cancel change the card irreversibly
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Replace | Self::Cancel)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Replace => "replace",
            Self::Cancel => "cancel",
            Self::Finish => "finish",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
