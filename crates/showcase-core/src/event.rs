//! Analytics event model.
//!
//! Every SDK callback and every user-facing adapter action is recorded as an
//! [`AnalyticsEvent`]. Events are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    SessionStarted,
    SessionError,
    SessionEnded,
    TriggerFired,
    ContentShown,
    Error,
    ContentReceived,
    WillDisplay,
    DidDisplay,
    ContentDismissed,
    ContentChanged,
}

impl EventCategory {
    /// Human readable label shown in the event log.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SessionStarted => "Session Started",
            Self::SessionError => "Session Error",
            Self::SessionEnded => "Session Ended",
            Self::TriggerFired => "Trigger Point",
            Self::ContentShown => "Show Content",
            Self::Error => "Error",
            Self::ContentReceived => "Content Received",
            Self::WillDisplay => "Will Display",
            Self::DidDisplay => "Did Display",
            Self::ContentDismissed => "Content Dismissed",
            Self::ContentChanged => "Content Changed",
        }
    }

    /// Whether this category reports a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::SessionError | Self::Error)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable, timestamped record in the analytics log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Unique event identifier (UUID v4)
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub category: EventCategory,
    /// Free-text detail
    pub detail: String,
}

impl AnalyticsEvent {
    /// Creates a new event stamped with the current time.
    pub fn new(category: EventCategory, detail: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            category,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<18} {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.category.label(),
            self.detail
        )
    }
}
