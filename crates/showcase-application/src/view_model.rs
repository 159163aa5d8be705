//! The showcase view model.
//!
//! Combines the analytics log, the session controller and the event bridge
//! into the state a UI binds to. It is a plain single-owner value: the
//! [`UiContext`](crate::runtime::UiContext) owns it and serialises every
//! mutation, and tests can drive it directly.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::Arc;

use serde::Serialize;
use showcase_core::{
    AnalyticsEvent, CxClient, PresentationType, Session, SessionStartError, UserAttributes,
};
use tokio::sync::watch;

use crate::analytics_log::AnalyticsLog;
use crate::event_bridge::{EventBridge, UserTriggeredContentState};
use crate::listener::SdkCallback;
use crate::session_controller::SessionController;

/// Receivers for every observable field of the view model.
#[derive(Debug, Clone)]
pub struct ViewBindings {
    pub session: watch::Receiver<Option<Session>>,
    pub analytics_events: watch::Receiver<VecDeque<AnalyticsEvent>>,
    pub triggers_with_content: watch::Receiver<HashSet<String>>,
    pub user_triggered_content: watch::Receiver<UserTriggeredContentState>,
}

/// Point-in-time copy of the view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub is_session_active: bool,
    pub current_user_id: Option<String>,
    pub has_user_triggered_content: bool,
    pub user_triggered_content_trigger_point: Option<String>,
    /// Sorted for stable display
    pub triggers_with_content: BTreeSet<String>,
    /// Newest first
    pub analytics_events: Vec<AnalyticsEvent>,
}

impl ViewSnapshot {
    /// Pretty-printed JSON with camelCase keys, as the UI layer reads it.
    pub fn to_json(&self) -> showcase_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct ShowcaseViewModel {
    log: AnalyticsLog,
    session: SessionController,
    bridge: EventBridge,
}

impl ShowcaseViewModel {
    pub fn new(client: Arc<dyn CxClient>) -> Self {
        Self {
            log: AnalyticsLog::new(),
            session: SessionController::new(client.clone()),
            bridge: EventBridge::new(client),
        }
    }

    // ============================================================================
    // Session lifecycle
    // ============================================================================

    pub async fn start_session(
        &mut self,
        user_id: impl Into<String>,
        attributes: Option<UserAttributes>,
    ) -> Result<(), SessionStartError> {
        self.session
            .start_session(&self.log, user_id.into(), attributes)
            .await
    }

    /// Applies a session start whose SDK call finished elsewhere.
    pub fn complete_session_start(
        &mut self,
        user_id: String,
        attributes: Option<UserAttributes>,
        result: Result<(), SessionStartError>,
    ) -> Result<(), SessionStartError> {
        self.session
            .complete_start(&self.log, user_id, attributes, result)
    }

    pub fn end_session(&mut self) {
        self.bridge.clear_user_triggered_content();
        self.session.end_session(&self.log);
    }

    // ============================================================================
    // SDK actions
    // ============================================================================

    pub fn trigger_point(&self, code: &str) {
        self.bridge.trigger_point(code, &self.log);
    }

    pub fn show_user_triggered_content(&self, trigger_point: Option<&str>) {
        self.bridge
            .show_user_triggered_content(trigger_point, &self.log);
    }

    pub fn setup_content_refresh(
        &mut self,
        trigger_points: Vec<String>,
        presentation_type: Option<PresentationType>,
    ) {
        self.bridge
            .setup_content_refresh(trigger_points, presentation_type);
    }

    pub fn setup_button_content_monitoring(&mut self, trigger_point: impl Into<String>) {
        self.bridge.setup_button_content_monitoring(trigger_point);
    }

    pub fn refresh_content_availability(&self) -> bool {
        self.bridge.refresh_content_availability()
    }

    pub fn has_content(&self, code: &str, presentation_type: Option<PresentationType>) -> bool {
        self.bridge.has_content(code, presentation_type)
    }

    pub fn clear_analytics(&self) {
        self.log.clear();
    }

    pub fn debug_mode(&self) -> bool {
        self.session.client().debug_mode()
    }

    pub fn set_debug_mode(&self, enabled: bool) {
        self.session.client().set_debug_mode(enabled);
        tracing::info!("[ShowcaseViewModel] Debug mode set to {}", enabled);
    }

    /// Entry point for callbacks marshalled from the SDK.
    pub fn handle_callback(&mut self, callback: SdkCallback) {
        self.bridge.handle(callback, &self.log);
    }

    // ============================================================================
    // Observable state
    // ============================================================================

    pub fn is_session_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.session.current_user_id()
    }

    pub fn analytics_events(&self) -> Vec<AnalyticsEvent> {
        self.log.snapshot()
    }

    pub fn triggers_with_content(&self) -> HashSet<String> {
        self.bridge.triggers_with_content()
    }

    pub fn user_triggered_content(&self) -> UserTriggeredContentState {
        self.bridge.user_triggered_content()
    }

    pub fn bindings(&self) -> ViewBindings {
        ViewBindings {
            session: self.session.subscribe(),
            analytics_events: self.log.subscribe(),
            triggers_with_content: self.bridge.subscribe_triggers_with_content(),
            user_triggered_content: self.bridge.subscribe_user_triggered_content(),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let user_triggered = self.bridge.user_triggered_content();
        ViewSnapshot {
            is_session_active: self.session.is_active(),
            current_user_id: self.session.current_user_id(),
            has_user_triggered_content: user_triggered.available,
            user_triggered_content_trigger_point: user_triggered.trigger_point,
            triggers_with_content: self.bridge.triggers_with_content().into_iter().collect(),
            analytics_events: self.log.snapshot(),
        }
    }
}
