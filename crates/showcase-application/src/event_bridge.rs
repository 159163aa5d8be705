//! Translation of SDK callbacks into analytics events and derived state.
//!
//! Every callback becomes exactly one [`AnalyticsEvent`]. A content change
//! additionally re-checks whichever monitoring subscriptions are armed:
//!
//! - the trigger-point list is fully re-queried and the published set is
//!   replaced only when it differs by value
//! - the button trigger point is re-queried and the flag flips only on a
//!   real transition

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use showcase_core::{
    AnalyticsEvent, ContentMonitor, CxClient, DisplayDecision, EventCategory, PresentationType,
};
use tokio::sync::watch;

use crate::analytics_log::AnalyticsLog;
use crate::listener::SdkCallback;
use crate::published::Published;

/// Whether on-demand content is ready for the monitored button trigger point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTriggeredContentState {
    pub available: bool,
    pub trigger_point: Option<String>,
}

pub struct EventBridge {
    client: Arc<dyn CxClient>,
    monitor: ContentMonitor,
    triggers_with_content: Published<HashSet<String>>,
    user_triggered: Published<UserTriggeredContentState>,
}

impl EventBridge {
    pub fn new(client: Arc<dyn CxClient>) -> Self {
        Self {
            client,
            monitor: ContentMonitor::new(),
            triggers_with_content: Published::default(),
            user_triggered: Published::default(),
        }
    }

    /// Maps a callback to the event recorded for it.
    pub fn translate(callback: &SdkCallback) -> AnalyticsEvent {
        match callback {
            SdkCallback::Error(error) => AnalyticsEvent::new(EventCategory::Error, error.to_string()),
            SdkCallback::ContentReceived(content) => AnalyticsEvent::new(
                EventCategory::ContentReceived,
                format!("Loaded {} content item(s)", content.len()),
            ),
            SdkCallback::WillShowContent { .. } => AnalyticsEvent::new(
                EventCategory::WillDisplay,
                "Content is about to be displayed",
            ),
            SdkCallback::DidShowContent(_) => {
                AnalyticsEvent::new(EventCategory::DidDisplay, "Content was displayed to user")
            }
            SdkCallback::ContentDismissed => {
                AnalyticsEvent::new(EventCategory::ContentDismissed, "User closed the content")
            }
            SdkCallback::ContentChanged => {
                AnalyticsEvent::new(EventCategory::ContentChanged, "Content availability updated")
            }
        }
    }

    /// Records the callback and runs its side effects.
    pub fn handle(&mut self, callback: SdkCallback, log: &AnalyticsLog) {
        let event = Self::translate(&callback);
        tracing::debug!("[EventBridge] {}: {}", event.category, event.detail);
        log.record(event);

        match callback {
            SdkCallback::ContentChanged => self.recheck_monitored(),
            SdkCallback::Error(error) => {
                tracing::warn!("[EventBridge] SDK reported error: {}", error);
            }
            SdkCallback::WillShowContent {
                content,
                decision: DisplayDecision::Cancel,
            } => {
                tracing::info!(
                    "[EventBridge] Display suppressed for {} ({})",
                    content.trigger_point,
                    content.id
                );
            }
            _ => {}
        }
    }

    fn recheck_monitored(&mut self) {
        if self.monitor.trigger_points_to_recheck().is_some() {
            self.refresh_content_availability();
        }
        if self.monitor.button().is_some() {
            self.check_button_triggered_content();
        }
    }

    /// Arms trigger-point monitoring and performs the initial refresh.
    ///
    /// Returns whether the published set changed.
    pub fn setup_content_refresh(
        &mut self,
        trigger_points: Vec<String>,
        presentation_type: Option<PresentationType>,
    ) -> bool {
        self.monitor
            .arm_trigger_points(trigger_points, presentation_type);
        self.refresh_content_availability()
    }

    /// Arms button-content monitoring and performs the initial check.
    pub fn setup_button_content_monitoring(&mut self, trigger_point: impl Into<String>) -> bool {
        self.monitor.arm_button(trigger_point);
        self.check_button_triggered_content()
    }

    /// Re-queries every monitored trigger point.
    ///
    /// Does nothing until monitoring is armed. Returns whether the published
    /// set changed.
    pub fn refresh_content_availability(&self) -> bool {
        let Some(subscription) = self.monitor.trigger_points() else {
            return false;
        };

        let available: HashSet<String> = subscription
            .trigger_points
            .iter()
            .filter(|trigger_point| {
                self.client
                    .has_content(trigger_point, subscription.presentation_type)
            })
            .cloned()
            .collect();

        let changed = self.triggers_with_content.set_if_changed(available);
        if changed {
            tracing::debug!(
                "[EventBridge] Trigger points with content: {:?}",
                self.triggers_with_content.borrow()
            );
        }
        changed
    }

    /// Re-queries the monitored button trigger point.
    ///
    /// Returns whether the published state transitioned.
    pub fn check_button_triggered_content(&self) -> bool {
        let Some(subscription) = self.monitor.button() else {
            return false;
        };
        let trigger_point = &subscription.trigger_point;
        let has_content = self
            .client
            .has_user_triggered_content_for_trigger_point(trigger_point);

        self.user_triggered.modify_if(|state| {
            if state.available == has_content {
                return false;
            }
            state.available = has_content;
            state.trigger_point = has_content.then(|| trigger_point.clone());
            true
        })
    }

    /// Drops the pending on-demand content flag.
    pub fn clear_user_triggered_content(&self) {
        self.user_triggered
            .set_if_changed(UserTriggeredContentState::default());
    }

    pub fn trigger_point(&self, code: &str, log: &AnalyticsLog) {
        self.client.trigger_point(code);
        log.push(EventCategory::TriggerFired, code);
    }

    pub fn show_user_triggered_content(&self, trigger_point: Option<&str>, log: &AnalyticsLog) {
        self.client.show_user_triggered_content(trigger_point);
        log.push(
            EventCategory::ContentShown,
            format!(
                "User-triggered content displayed for: {}",
                trigger_point.unwrap_or("most recent")
            ),
        );
    }

    pub fn has_content(&self, code: &str, presentation_type: Option<PresentationType>) -> bool {
        self.client.has_content(code, presentation_type)
    }

    pub fn triggers_with_content(&self) -> HashSet<String> {
        self.triggers_with_content.get()
    }

    pub fn user_triggered_content(&self) -> UserTriggeredContentState {
        self.user_triggered.get()
    }

    pub fn subscribe_triggers_with_content(&self) -> watch::Receiver<HashSet<String>> {
        self.triggers_with_content.subscribe()
    }

    pub fn subscribe_user_triggered_content(&self) -> watch::Receiver<UserTriggeredContentState> {
        self.user_triggered.subscribe()
    }
}
