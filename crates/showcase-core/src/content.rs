//! Content items and presentation types as surfaced by the SDK.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distinguishes automatically displayed content from on-demand content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationType {
    /// Shown automatically when a trigger point fires
    Popup,
    /// Shown only when the user explicitly asks for it
    Button,
}

impl PresentationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popup => "popup",
            Self::Button => "button",
        }
    }
}

impl fmt::Display for PresentationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresentationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popup" => Ok(Self::Popup),
            "button" => Ok(Self::Button),
            other => Err(format!("Unknown presentation type: {}", other)),
        }
    }
}

/// A single piece of targeted content delivered by the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: String,
    pub trigger_point: String,
    pub presentation_type: PresentationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Content {
    pub fn new(
        id: impl Into<String>,
        trigger_point: impl Into<String>,
        presentation_type: PresentationType,
    ) -> Self {
        Self {
            id: id.into(),
            trigger_point: trigger_point.into(),
            presentation_type,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether this item belongs to `trigger_point` and passes the optional filter.
    pub fn matches(&self, trigger_point: &str, filter: Option<PresentationType>) -> bool {
        self.trigger_point == trigger_point
            && filter.is_none_or(|presentation| presentation == self.presentation_type)
    }
}
