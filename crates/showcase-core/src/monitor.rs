//! Content monitoring subscriptions.
//!
//! Two independent, optional subscriptions decide what gets re-checked when
//! the SDK reports that content changed:
//!
//! - a list of trigger points with an optional presentation-type filter
//! - a single trigger point watched for on-demand (button) content
//!
//! Arming either one replaces its previous record and leaves the other
//! untouched.

use serde::{Deserialize, Serialize};

use crate::content::PresentationType;

/// Watch a list of trigger points for displayable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPointSubscription {
    pub trigger_points: Vec<String>,
    pub presentation_type: Option<PresentationType>,
}

/// Watch one trigger point for on-demand content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSubscription {
    pub trigger_point: String,
}

/// Holds the two optional monitoring subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMonitor {
    trigger_points: Option<TriggerPointSubscription>,
    button: Option<ButtonSubscription>,
}

impl ContentMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms (or re-arms) trigger-point monitoring and returns the new record.
    pub fn arm_trigger_points(
        &mut self,
        trigger_points: Vec<String>,
        presentation_type: Option<PresentationType>,
    ) -> &TriggerPointSubscription {
        self.trigger_points.insert(TriggerPointSubscription {
            trigger_points,
            presentation_type,
        })
    }

    /// Arms (or re-arms) button-content monitoring and returns the new record.
    pub fn arm_button(&mut self, trigger_point: impl Into<String>) -> &ButtonSubscription {
        self.button.insert(ButtonSubscription {
            trigger_point: trigger_point.into(),
        })
    }

    pub fn disarm_trigger_points(&mut self) -> Option<TriggerPointSubscription> {
        self.trigger_points.take()
    }

    pub fn disarm_button(&mut self) -> Option<ButtonSubscription> {
        self.button.take()
    }

    pub fn trigger_points(&self) -> Option<&TriggerPointSubscription> {
        self.trigger_points.as_ref()
    }

    pub fn button(&self) -> Option<&ButtonSubscription> {
        self.button.as_ref()
    }

    /// The trigger-point subscription to re-check on a content change.
    ///
    /// An armed but empty list has nothing to re-check.
    pub fn trigger_points_to_recheck(&self) -> Option<&TriggerPointSubscription> {
        self.trigger_points
            .as_ref()
            .filter(|sub| !sub.trigger_points.is_empty())
    }
}
