//! Display policies consulted by the pre-display hook.

use std::collections::HashSet;

use crate::client::DisplayDecision;
use crate::content::Content;

/// Decides whether content about to be displayed may be shown.
pub trait DisplayPolicy: Send + Sync {
    fn decide(&self, content: &Content) -> DisplayDecision;
}

/// Never cancels a display. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAllow;

impl DisplayPolicy for AlwaysAllow {
    fn decide(&self, _content: &Content) -> DisplayDecision {
        DisplayDecision::Allow
    }
}

/// Cancels display for content attached to any of the listed trigger points.
#[derive(Debug, Clone, Default)]
pub struct SuppressTriggerPoints {
    trigger_points: HashSet<String>,
}

impl SuppressTriggerPoints {
    pub fn new<I, S>(trigger_points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trigger_points: trigger_points.into_iter().map(Into::into).collect(),
        }
    }
}

impl DisplayPolicy for SuppressTriggerPoints {
    fn decide(&self, content: &Content) -> DisplayDecision {
        if self.trigger_points.contains(&content.trigger_point) {
            DisplayDecision::Cancel
        } else {
            DisplayDecision::Allow
        }
    }
}
